//! An abstraction over mixed-integer linear programming engines.
//!
//! The formulation is posted through [`MipEngine`], so any engine which can declare variables, post
//! linear constraints and report solved values can be plugged in. [`MicrolpEngine`] is a pure Rust
//! backend based on `microlp`.

mod expression;
pub use self::expression::*;

mod backend;
pub use self::backend::MicrolpEngine;

mod model;
pub use self::model::*;

use crate::utils::{Float, GenericResult};
use std::io::Write;
use std::time::Duration;

/// A handle of a declared variable: its position in declaration order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Variable(usize);

impl Variable {
    /// Creates a handle from declaration index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns declaration index.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A variable domain.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VarDomain {
    /// Zero or one.
    Binary,
    /// Integer within bounds.
    Integer,
    /// Real within bounds.
    Continuous,
}

/// An optimization direction.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ObjectiveDirection {
    /// Minimize objective.
    #[default]
    Minimize,
    /// Maximize objective.
    Maximize,
}

/// Specifies where the engine keeps search tree nodes when memory is short.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum NodeFileStrategy {
    /// Keep everything in memory.
    InMemory,
    /// Write node files to disk.
    Disk,
    /// Write compressed node files to disk.
    #[default]
    DiskCompressed,
}

/// Engine parameters of a single solve.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveParams {
    /// Time limit of the search.
    pub time_limit: Duration,
    /// Node file handling.
    pub node_file: NodeFileStrategy,
}

/// A terminal status of the solve.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SolveStatus {
    /// Proven optimal solution found.
    Optimal,
    /// A feasible solution found, optimality is not proven.
    Feasible,
    /// Constraints cannot be satisfied.
    Infeasible,
    /// Objective is unbounded.
    Unbounded,
    /// Time limit reached without any feasible solution.
    TimedOut,
}

impl SolveStatus {
    /// Returns true if solved values can be read.
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Feasible => "feasible",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::TimedOut => "timed out",
        };
        write!(f, "{status}")
    }
}

/// Receives engine events during the solve.
pub trait IncumbentListener {
    /// Called when the engine finds a feasible solution with the given objective value.
    fn on_incumbent(&mut self, objective: Float);
}

/// A mixed-integer linear programming engine.
///
/// Values can be read only after `solve` returned a solved status.
pub trait MipEngine {
    /// Declares a new variable.
    fn add_variable(&mut self, name: &str, domain: VarDomain, lower: Float, upper: Float) -> GenericResult<Variable>;

    /// Declares a binary variable.
    fn add_binary(&mut self, name: &str) -> GenericResult<Variable> {
        self.add_variable(name, VarDomain::Binary, 0., 1.)
    }

    /// Declares an integer variable.
    fn add_integer(&mut self, name: &str, lower: Float, upper: Float) -> GenericResult<Variable> {
        self.add_variable(name, VarDomain::Integer, lower, upper)
    }

    /// Declares a continuous variable.
    fn add_continuous(&mut self, name: &str, lower: Float, upper: Float) -> GenericResult<Variable> {
        self.add_variable(name, VarDomain::Continuous, lower, upper)
    }

    /// Posts a constraint.
    fn add_constraint(&mut self, constraint: Constraint) -> GenericResult<()>;

    /// Sets the objective.
    fn set_objective(&mut self, objective: LinearExpr, direction: ObjectiveDirection) -> GenericResult<()>;

    /// Runs the search. Errors are engine failures, not modeled outcomes.
    fn solve(&mut self, params: &SolveParams, listener: &mut dyn IncumbentListener) -> GenericResult<SolveStatus>;

    /// Returns solved value of the variable.
    fn value(&self, variable: Variable) -> GenericResult<Float>;

    /// Returns solved objective value.
    fn objective_value(&self) -> GenericResult<Float>;

    /// Returns solved value of the expression.
    fn evaluate(&self, expr: &LinearExpr) -> GenericResult<Float> {
        expr.terms().iter().try_fold(expr.constant(), |acc, &(variable, coeff)| {
            self.value(variable).map(|value| acc + coeff * value)
        })
    }

    /// Writes the posted model in LP text format.
    fn write_lp(&self, _writer: &mut dyn Write) -> GenericResult<()> {
        Err("model export is not supported by the engine".into())
    }
}
