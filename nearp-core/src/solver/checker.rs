#[cfg(test)]
#[path = "../../tests/unit/solver/checker_test.rs"]
mod checker_test;

use crate::models::*;
use crate::utils::{Float, GenericError, is_close};
use rustc_hash::FxHashSet;

/// Absolute tolerance used to compare solved continuous values.
const VALUE_TOLERANCE: Float = 1e-4;

/// Checks solved values of a solution against the formulation graph.
pub struct SolutionChecker<'a> {
    graph: &'a FormulationGraph,
    solution: &'a Solution,
}

impl<'a> SolutionChecker<'a> {
    /// Creates a new instance of `SolutionChecker`.
    pub fn new(graph: &'a FormulationGraph, solution: &'a Solution) -> Self {
        Self { graph, solution }
    }

    /// Performs solution check, returns all found violations.
    pub fn check(&self) -> Result<(), Vec<GenericError>> {
        // avoid duplicates keeping original order
        let (_, errors) = self
            .check_assignment()
            .err()
            .into_iter()
            .chain(self.check_routing().err())
            .chain(self.check_costs().err())
            .flatten()
            .fold((FxHashSet::default(), Vec::default()), |(mut used, mut errors), error| {
                if used.insert(error.clone()) {
                    errors.push(error);
                }

                (used, errors)
            });

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Every required entity is serviced by exactly one vehicle.
    fn check_assignment(&self) -> Result<(), Vec<GenericError>> {
        let graph = self.graph;
        let assignments = &self.solution.assignments;
        let count_arc = |arc_id: ArcId| assignments.iter().filter(|a| a.services_arc(graph, arc_id)).count();

        let arcs = graph.original_required_arcs().iter().filter_map(|&arc_id| {
            let count = count_arc(arc_id);
            let arc = graph.arc(arc_id);
            (count != 1).then(|| format!("required arc ({},{}) is serviced {count} time(s)", arc.from, arc.to))
        });

        let edges = graph.required_edges().iter().filter_map(|edge| {
            let count = if edge.forward == edge.backward {
                count_arc(edge.forward)
            } else {
                count_arc(edge.forward) + count_arc(edge.backward)
            };
            let arc = graph.arc(edge.forward);
            (count != 1).then(|| format!("required edge ({},{}) is serviced {count} time(s)", arc.from, arc.to))
        });

        let nodes = graph.required_nodes().iter().filter_map(|node| {
            let count = assignments.iter().filter(|a| a.services_node(graph, node.id)).count();
            (count != 1).then(|| format!("required node {} is serviced {count} time(s)", node.id))
        });

        collect_errors(arcs.chain(edges).chain(nodes))
    }

    /// Every vehicle leaves the depot at most once and conserves its flow at other nodes.
    fn check_routing(&self) -> Result<(), Vec<GenericError>> {
        let graph = self.graph;

        let errors = self.solution.assignments.iter().flat_map(|assignment| {
            let uses = |arcs: &[ArcId]| arcs.iter().map(|&arc_id| assignment.arc_uses(graph, arc_id)).sum::<usize>();

            let departures = uses(graph.outgoing(graph.depot()));
            let departure =
                (departures > 1).then(|| format!("vehicle {} leaves the depot {departures} times", assignment.vehicle));

            let conservation = graph.nodes().filter(|&node| node != graph.depot()).filter_map(move |node| {
                let (inflow, outflow) = (uses(graph.incoming(node)), uses(graph.outgoing(node)));
                (inflow != outflow).then(|| {
                    let vehicle = assignment.vehicle;
                    format!("vehicle {vehicle} enters node {node} {inflow} times, leaves {outflow} times")
                })
            });

            departure.into_iter().chain(conservation).collect::<Vec<_>>()
        });

        collect_errors(errors)
    }

    /// Route costs agree with the solved values, respect the duration limit and are ordered.
    fn check_costs(&self) -> Result<(), Vec<GenericError>> {
        let graph = self.graph;
        let assignments = &self.solution.assignments;
        let capacity = graph.fleet().capacity as Float;

        let agreement = assignments.iter().filter_map(|assignment| {
            let expected = calculate_cost(graph, assignment);
            (!is_close(expected, assignment.cost, VALUE_TOLERANCE)).then(|| {
                format!("vehicle {} has cost {}, expected {expected}", assignment.vehicle, assignment.cost)
            })
        });

        let budget = assignments.iter().filter_map(|assignment| {
            (assignment.cost > capacity + VALUE_TOLERANCE).then(|| {
                format!("vehicle {} exceeds duration limit: {} > {capacity}", assignment.vehicle, assignment.cost)
            })
        });

        let symmetry = assignments.windows(2).filter_map(|pair| {
            (pair[0].cost + VALUE_TOLERANCE < pair[1].cost).then(|| {
                format!("vehicle {} is cheaper than vehicle {}", pair[0].vehicle, pair[1].vehicle)
            })
        });

        let total = assignments.iter().map(|assignment| assignment.cost).sum::<Float>().round() as Cost;
        let objective = (total != self.solution.objective).then(|| {
            format!("objective {} differs from total route cost {total}", self.solution.objective)
        });

        collect_errors(agreement.chain(budget).chain(symmetry).chain(objective))
    }
}

/// Calculates Z_k directly from the solved values.
pub fn calculate_cost(graph: &FormulationGraph, assignment: &VehicleAssignment) -> Float {
    let services = graph
        .required_arcs()
        .iter()
        .zip(assignment.arc_services.iter())
        .map(|(&arc_id, value)| graph.arc(arc_id).service_cost as Float * value)
        .sum::<Float>();

    let nodes = graph
        .required_nodes()
        .iter()
        .zip(assignment.node_services.iter())
        .map(|(node, value)| node.service_cost as Float * value)
        .sum::<Float>();

    let deadheads = graph
        .arcs()
        .iter()
        .zip(assignment.deadheads.iter())
        .map(|(arc, value)| arc.traversal_cost as Float * value)
        .sum::<Float>();

    let turns = graph
        .turns()
        .iter()
        .zip(assignment.turns.iter())
        .map(|(turn, value)| turn.cost as Float * value)
        .sum::<Float>();

    services + nodes + deadheads + turns
}

fn collect_errors(errors: impl Iterator<Item = String>) -> Result<(), Vec<GenericError>> {
    let errors = errors.map(GenericError::from).collect::<Vec<_>>();

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
