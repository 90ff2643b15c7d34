//! This module contains helper functionality.

mod environment;
pub use self::environment::*;

mod error;
pub use self::error::*;

mod timing;
pub use self::timing::*;

/// Alias to a scalar floating type.
pub type Float = f64;

/// Compares floats with given tolerance.
pub fn is_close(a: Float, b: Float, tolerance: Float) -> bool {
    (a - b).abs() <= tolerance
}
