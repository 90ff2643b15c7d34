//! Contains the solve pipeline: engine driving, solution extraction, route tracing and checking.

#[cfg(test)]
#[path = "../../tests/unit/solver/solver_test.rs"]
mod solver_test;

mod checker;
pub use self::checker::*;

mod driver;
pub use self::driver::*;

mod extraction;
pub use self::extraction::*;

mod routing;
pub use self::routing::*;

use crate::construction::{FormulationModel, ModelBuilder, preprocess};
use crate::mip::{MipEngine, NodeFileStrategy, SolveStatus};
use crate::models::{Formulation, FormulationGraph, Instance, Solution};
use crate::utils::{Environment, GenericResult, Timer};
use std::io::Write;

/// A terminal outcome of the run.
#[derive(Clone, Debug)]
pub enum Outcome {
    /// A feasible or optimal solution was found.
    Solved(Solution),
    /// No solution: the model is infeasible, unbounded or the time limit was reached first.
    Unsolved(SolveStatus),
}

/// Runs the whole pipeline: preprocessing, model building, solving and extraction.
///
/// # Examples
///
/// ```
/// use nearp_core::prelude::*;
///
/// let instance = Instance {
///     name: "single".to_string(),
///     fleet: FleetSize::Fixed(1),
///     capacity: 10,
///     depot: 1,
///     nodes: vec![Node::optional(1), Node::optional(2)],
///     edges: vec![],
///     arcs: vec![Link::required(1, 2, 1, 5), Link::optional(2, 1, 0)],
///     turns: vec![],
/// }
/// .validate()?;
///
/// let environment = Environment::default();
/// let mut solver = Solver::new(&instance, Formulation::Nearp, MicrolpEngine::default(), environment)?;
///
/// match solver.solve(NodeFileStrategy::InMemory)? {
///     Outcome::Solved(solution) => assert_eq!(solution.objective, 5),
///     Outcome::Unsolved(status) => panic!("unexpected status: {status}"),
/// }
/// # Ok::<(), GenericError>(())
/// ```
pub struct Solver<E: MipEngine> {
    engine: E,
    graph: FormulationGraph,
    model: FormulationModel,
    environment: Environment,
}

impl<E: MipEngine> Solver<E> {
    /// Preprocesses the instance and posts its formulation into the engine.
    pub fn new(
        instance: &Instance,
        formulation: Formulation,
        mut engine: E,
        environment: Environment,
    ) -> GenericResult<Self> {
        let logger = environment.logger.clone();

        let graph = Timer::measure_duration_with_callback(
            || preprocess(instance),
            |duration| (logger)(&format!("preprocessing took {}ms", duration.as_millis())),
        );

        (logger)(&format!(
            "formulation graph: {} nodes, {} arcs ({} required), {} turns, fleet {} x {}",
            graph.node_count(),
            graph.arcs().len(),
            graph.required_arcs().len(),
            graph.turns().len(),
            graph.fleet().size,
            graph.fleet().capacity
        ));

        let model = Timer::measure_duration_with_callback(
            || ModelBuilder::new(&graph, formulation, &environment).build(&mut engine),
            |duration| (logger)(&format!("model building took {}ms", duration.as_millis())),
        )?;

        Ok(Self { engine, graph, model, environment })
    }

    /// Returns the formulation graph.
    pub fn graph(&self) -> &FormulationGraph {
        &self.graph
    }

    /// Returns the posted model.
    pub fn model(&self) -> &FormulationModel {
        &self.model
    }

    /// Writes the posted model in LP text format.
    pub fn export_model(&self, writer: &mut dyn Write) -> GenericResult<()> {
        self.engine.write_lp(writer)
    }

    /// Solves the model within the remaining time budget.
    pub fn solve(&mut self, node_file: NodeFileStrategy) -> GenericResult<Outcome> {
        let report = SolverDriver::new(&self.environment, node_file).solve(&mut self.engine)?;

        if !report.is_solved() {
            return Ok(Outcome::Unsolved(report.status));
        }

        extract_solution(&self.engine, &self.graph, &self.model, &report, &self.environment).map(Outcome::Solved)
    }
}
