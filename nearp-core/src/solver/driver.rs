#[cfg(test)]
#[path = "../../tests/unit/solver/driver_test.rs"]
mod driver_test;

use crate::mip::{IncumbentListener, MipEngine, NodeFileStrategy, SolveParams, SolveStatus};
use crate::utils::{Environment, Float, GenericResult, InfoLogger, Timer};

/// An objective improvement smaller than this value is not considered as a new incumbent.
pub const INCUMBENT_TOLERANCE: Float = 1e-6;

/// Telemetry of a single solve.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveReport {
    /// Terminal status.
    pub status: SolveStatus,
    /// Best incumbent objective, if any.
    pub best_objective: Option<Float>,
    /// Elapsed time when the best incumbent was found, measured by the environment timer.
    pub time_to_best_millis: u64,
    /// Amount of accepted incumbent improvements.
    pub improvements: usize,
}

impl SolveReport {
    /// Returns true if solved values can be extracted.
    pub fn is_solved(&self) -> bool {
        self.status.is_solved()
    }
}

/// Configures the engine with the remaining time budget, runs the search and tracks incumbents.
pub struct SolverDriver<'a> {
    environment: &'a Environment,
    node_file: NodeFileStrategy,
}

impl<'a> SolverDriver<'a> {
    /// Creates a new instance of `SolverDriver`.
    pub fn new(environment: &'a Environment, node_file: NodeFileStrategy) -> Self {
        Self { environment, node_file }
    }

    /// Runs the search. Unsolved outcomes are reported as a status, engine failures as an error.
    pub fn solve<E: MipEngine>(&self, engine: &mut E) -> GenericResult<SolveReport> {
        let params = SolveParams { time_limit: self.environment.remaining_time(), node_file: self.node_file };
        let logger = &self.environment.logger;

        (logger)(&format!("starting search with time limit {:.3}s", params.time_limit.as_secs_f64()));

        let mut tracker = IncumbentTracker::new(&self.environment.timer, logger.clone());
        let status = engine.solve(&params, &mut tracker).map_err(|err| err.context("engine failed during search"))?;

        (logger)(&format!(
            "search finished with status '{status}', {} incumbent(s), elapsed {}ms",
            tracker.improvements,
            self.environment.timer.elapsed_millis()
        ));

        Ok(SolveReport {
            status,
            best_objective: tracker.best,
            time_to_best_millis: tracker.time_to_best_millis,
            improvements: tracker.improvements,
        })
    }
}

/// Records objective and time of every incumbent which improves the best one.
pub(crate) struct IncumbentTracker<'a> {
    timer: &'a Timer,
    logger: InfoLogger,
    best: Option<Float>,
    time_to_best_millis: u64,
    improvements: usize,
}

impl<'a> IncumbentTracker<'a> {
    pub(crate) fn new(timer: &'a Timer, logger: InfoLogger) -> Self {
        Self { timer, logger, best: None, time_to_best_millis: 0, improvements: 0 }
    }
}

impl IncumbentListener for IncumbentTracker<'_> {
    fn on_incumbent(&mut self, objective: Float) {
        let is_improvement = self.best.is_none_or(|best| objective < best - INCUMBENT_TOLERANCE);
        if !is_improvement {
            return;
        }

        self.best = Some(objective);
        self.time_to_best_millis = self.timer.elapsed_millis() as u64;
        self.improvements += 1;

        (self.logger)(&format!("new incumbent {objective:.3} at {}ms", self.time_to_best_millis));
    }
}
