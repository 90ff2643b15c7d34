//! Core crate builds an exact mixed-integer linear programming formulation of the ***Node, Edge, and
//! Arc Routing Problem*** (NEARP) and its variant with turn penalties (NEARP-TP), drives a MIP engine
//! to solve it and reconstructs vehicle routes from the solved values.
//!
//! The pipeline is:
//! - [`construction::preprocess`] expands edges into opposite arcs and builds a formulation graph
//! - [`construction::ModelBuilder`] declares variables and posts the objective and constraints
//! - [`solver::SolverDriver`] runs the engine within the remaining time budget
//! - [`solver::extract_solution`] reads the values back and traces routes
//!
//! [`solver::Solver`] wraps all steps.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod construction;
pub mod mip;
pub mod models;
pub mod prelude;
pub mod solver;
pub mod utils;
