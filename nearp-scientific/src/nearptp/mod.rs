//! Contains functionality to read NEARP-TP instances. Solutions are written with [`crate::nearp::NearpSolution`].

mod reader;
pub use self::reader::NearpTpProblem;
