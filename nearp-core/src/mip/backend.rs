#[cfg(test)]
#[path = "../../tests/unit/mip/backend_test.rs"]
mod backend_test;

use super::*;
use crate::utils::{Float, GenericResult, InfoLogger};
use std::io::Write;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;

const TRIVIAL_TOLERANCE: Float = 1e-9;

/// An engine backed by `microlp`, a pure Rust simplex with branch and bound for integer variables.
///
/// The model is recorded while it is posted and materialized as `microlp::Problem` on `solve`. The
/// search runs on a worker thread which is abandoned when the time limit expires. `microlp` reports
/// only the final solution, so the listener receives a single incumbent.
pub struct MicrolpEngine {
    record: ModelRecord,
    solved: Option<SolvedValues>,
    logger: InfoLogger,
}

struct SolvedValues {
    objective: Float,
    values: Vec<Float>,
}

impl MicrolpEngine {
    /// Creates a new instance of `MicrolpEngine`.
    pub fn new(logger: InfoLogger) -> Self {
        Self { record: ModelRecord::default(), solved: None, logger }
    }

    /// Returns the recorded model.
    pub fn record(&self) -> &ModelRecord {
        &self.record
    }

    /// Builds `microlp` problem, returns none when a constraint without terms cannot be satisfied.
    fn create_problem(&self) -> Option<(::microlp::Problem, Vec<::microlp::Variable>)> {
        let direction = match self.record.direction() {
            ObjectiveDirection::Minimize => ::microlp::OptimizationDirection::Minimize,
            ObjectiveDirection::Maximize => ::microlp::OptimizationDirection::Maximize,
        };

        let mut obj_coeffs = vec![0.; self.record.variables().len()];
        self.record.objective().terms().iter().for_each(|&(variable, coeff)| obj_coeffs[variable.index()] += coeff);

        let mut problem = ::microlp::Problem::new(direction);
        let variables = self
            .record
            .variables()
            .iter()
            .zip(obj_coeffs)
            .map(|(variable, obj_coeff)| match variable.domain {
                VarDomain::Binary => problem.add_binary_var(obj_coeff),
                VarDomain::Integer => problem
                    .add_integer_var(obj_coeff, (to_integer_bound(variable.lower), to_integer_bound(variable.upper))),
                VarDomain::Continuous => problem.add_var(obj_coeff, (variable.lower, variable.upper)),
            })
            .collect::<Vec<_>>();

        for constraint in self.record.constraints() {
            // microlp does not accept rows without terms
            if constraint.expr.is_empty() {
                if constraint.is_satisfied(|_| 0., TRIVIAL_TOLERANCE) {
                    continue;
                }
                return None;
            }

            let op = match constraint.sense {
                Sense::Eq => ::microlp::ComparisonOp::Eq,
                Sense::Le => ::microlp::ComparisonOp::Le,
                Sense::Ge => ::microlp::ComparisonOp::Ge,
            };
            let terms = constraint
                .expr
                .terms()
                .iter()
                .map(|&(variable, coeff)| (variables[variable.index()], coeff))
                .collect::<Vec<_>>();

            problem.add_constraint(terms, op, constraint.rhs);
        }

        Some((problem, variables))
    }
}

impl Default for MicrolpEngine {
    fn default() -> Self {
        Self::new(Arc::new(|_| ()))
    }
}

impl MipEngine for MicrolpEngine {
    fn add_variable(&mut self, name: &str, domain: VarDomain, lower: Float, upper: Float) -> GenericResult<Variable> {
        self.record.add_variable(name, domain, lower, upper)
    }

    fn add_constraint(&mut self, constraint: Constraint) -> GenericResult<()> {
        self.record.add_constraint(constraint)
    }

    fn set_objective(&mut self, objective: LinearExpr, direction: ObjectiveDirection) -> GenericResult<()> {
        self.record.set_objective(objective, direction)
    }

    fn solve(&mut self, params: &SolveParams, listener: &mut dyn IncumbentListener) -> GenericResult<SolveStatus> {
        self.solved = None;

        if params.time_limit.is_zero() {
            (self.logger)("no time left for the search");
            return Ok(SolveStatus::TimedOut);
        }

        if params.node_file != NodeFileStrategy::InMemory {
            let strategy = params.node_file;
            (self.logger)(&format!("node file strategy {strategy:?} is not available, search tree stays in memory"));
        }

        let Some((problem, variables)) = self.create_problem() else {
            (self.logger)("model has a violated constraint without terms");
            return Ok(SolveStatus::Infeasible);
        };
        let (sender, receiver) = mpsc::channel();

        thread::Builder::new().name("microlp-search".to_string()).spawn(move || {
            let result = problem.solve().map(|solution| {
                let values = variables.iter().map(|&variable| *solution.var_value(variable)).collect::<Vec<_>>();
                (solution.objective(), values)
            });
            // receiver is gone when the time limit has expired
            let _ = sender.send(result);
        })?;

        match receiver.recv_timeout(params.time_limit) {
            Ok(Ok((objective, values))) => {
                let objective = objective + self.record.objective().constant();
                listener.on_incumbent(objective);
                self.solved = Some(SolvedValues { objective, values });

                Ok(SolveStatus::Optimal)
            }
            Ok(Err(::microlp::Error::Infeasible)) => Ok(SolveStatus::Infeasible),
            Ok(Err(::microlp::Error::Unbounded)) => Ok(SolveStatus::Unbounded),
            Ok(Err(err)) => Err(format!("microlp failed: {err}").into()),
            Err(RecvTimeoutError::Timeout) => Ok(SolveStatus::TimedOut),
            Err(RecvTimeoutError::Disconnected) => Err("microlp search terminated unexpectedly".into()),
        }
    }

    fn value(&self, variable: Variable) -> GenericResult<Float> {
        let solved = self.solved.as_ref().ok_or("values are available only after a successful solve")?;

        solved
            .values
            .get(variable.index())
            .copied()
            .ok_or_else(|| format!("unknown variable with index {}", variable.index()).into())
    }

    fn objective_value(&self) -> GenericResult<Float> {
        self.solved
            .as_ref()
            .map(|solved| solved.objective)
            .ok_or_else(|| "objective is available only after a successful solve".into())
    }

    fn write_lp(&self, writer: &mut dyn Write) -> GenericResult<()> {
        self.record.write_lp(writer)
    }
}

fn to_integer_bound(value: Float) -> i32 {
    if value.is_nan() {
        0
    } else {
        value.round().clamp(i32::MIN as Float, i32::MAX as Float) as i32
    }
}
