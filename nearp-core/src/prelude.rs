//! This module reimports commonly used types.

pub use crate::construction::{FormulationModel, ModelBuilder, VariableIndex, preprocess};

pub use crate::mip::{MicrolpEngine, MipEngine, NodeFileStrategy, SolveStatus};

pub use crate::models::{FleetSize, Formulation, FormulationGraph, Instance, Link, Node, Turn, TurnKind};
pub use crate::models::{Route, RouteSegment, Solution};

pub use crate::solver::{Outcome, SolutionChecker, Solver};

pub use crate::utils::{Environment, GenericError, GenericResult, InfoLogger, Timer};
