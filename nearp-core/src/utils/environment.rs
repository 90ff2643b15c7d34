use super::Timer;
use std::sync::Arc;
use std::time::Duration;

/// A logger type which is called with various information regarding the work done by the solver.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Default overall wall-clock budget of a run.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(3600);

/// Keeps track of environment specific information which influences solver behavior.
#[derive(Clone)]
pub struct Environment {
    /// Information logger.
    pub logger: InfoLogger,
    /// A timer started together with the process.
    pub timer: Timer,
    /// An overall wall-clock budget measured by `timer`.
    pub time_budget: Duration,
}

impl Environment {
    /// Creates an environment with the given logger and budget, measured from now.
    pub fn new(logger: InfoLogger, time_budget: Duration) -> Self {
        Self { logger, timer: Timer::start(), time_budget }
    }

    /// Returns the part of the time budget which is not spent yet.
    pub fn remaining_time(&self) -> Duration {
        self.timer.remaining(self.time_budget)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(Arc::new(|_| ()), DEFAULT_TIME_BUDGET)
    }
}
