//! A collection of models to represent problem and solution in arc routing domain.

mod graph;
pub use self::graph::*;

mod problem;
pub use self::problem::*;

mod solution;
pub use self::solution::*;
