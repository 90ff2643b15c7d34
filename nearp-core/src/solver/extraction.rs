#[cfg(test)]
#[path = "../../tests/unit/solver/extraction_test.rs"]
mod extraction_test;

use super::{SolveReport, trace_route};
use crate::construction::FormulationModel;
use crate::mip::{MipEngine, Variable};
use crate::models::*;
use crate::utils::{Environment, Float, GenericResult};
use rayon::prelude::*;

/// Reads solved values back from the engine and reconstructs routes.
///
/// Values are copied out of the engine first, routes are traced afterwards in parallel without any
/// engine access.
pub fn extract_solution<E: MipEngine>(
    engine: &E,
    graph: &FormulationGraph,
    model: &FormulationModel,
    report: &SolveReport,
    environment: &Environment,
) -> GenericResult<Solution> {
    if !report.is_solved() {
        return Err(format!("cannot extract solution with status '{}'", report.status).into());
    }

    let assignments = (0..model.variables.vehicles())
        .map(|vehicle| snapshot_vehicle(engine, graph, model, vehicle))
        .collect::<GenericResult<Vec<_>>>()
        .map_err(|err| err.context("cannot read solved values"))?;

    let objective = engine.objective_value()?.round() as Cost;

    let logger = &environment.logger;
    let routes = assignments.par_iter().map(|assignment| trace_route(graph, assignment, logger)).collect::<Vec<_>>();

    let solution = Solution {
        objective,
        routes,
        total_time_millis: environment.timer.elapsed_millis() as u64,
        time_to_best_millis: report.time_to_best_millis,
        assignments,
    };

    (logger)(&format!(
        "solution extracted: objective {}, {} of {} vehicle(s) used",
        solution.objective,
        solution.vehicles_used(),
        solution.routes.len()
    ));

    Ok(solution)
}

fn snapshot_vehicle<E: MipEngine>(
    engine: &E,
    graph: &FormulationGraph,
    model: &FormulationModel,
    vehicle: usize,
) -> GenericResult<VehicleAssignment> {
    let variables = &model.variables;
    let arc_ids = 0..graph.arcs().len();

    let turns = if variables.has_turns() {
        read_values(engine, (0..graph.turns().len()).map(|turn_id| variables.turn(vehicle, turn_id)))?
    } else {
        vec![]
    };

    Ok(VehicleAssignment {
        vehicle,
        arc_services: read_values(engine, variables.services(vehicle).iter().copied())?,
        node_services: read_values(engine, variables.node_services(vehicle).iter().copied())?,
        deadheads: read_values(engine, arc_ids.clone().map(|arc_id| variables.deadhead(vehicle, arc_id)))?,
        flows: read_values(engine, arc_ids.map(|arc_id| variables.flow(vehicle, arc_id)))?,
        turns,
        cost: engine.evaluate(&model.costs[vehicle])?,
    })
}

fn read_values<E: MipEngine>(engine: &E, variables: impl Iterator<Item = Variable>) -> GenericResult<Vec<Float>> {
    variables.map(|variable| engine.value(variable)).collect()
}
