//! Contains building blocks to transform an instance into a mixed-integer linear program.

mod formulation;
pub use self::formulation::*;

mod preprocessing;
pub use self::preprocessing::*;

mod variables;
pub use self::variables::*;
