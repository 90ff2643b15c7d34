//! Contains functionality to read NEARP instances and write their solutions.

mod reader;
pub use self::reader::NearpProblem;

mod writer;
pub use self::writer::NearpSolution;
