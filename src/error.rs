//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors raised while building, perturbing, or annealing a spin system.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IsingError {
    /// A system must hold at least one spin.
    #[error("spin count must be positive, got {0}")]
    InvalidSize(usize),

    /// Two inputs that must agree in length do not.
    #[error("{what}: expected length {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A spin or coupling index is past the end of the system.
    #[error("index {index} out of range for {len} spins")]
    IndexOutOfRange { index: usize, len: usize },

    /// A value that must be finite was NaN or infinite.
    #[error("{0} must be finite")]
    NonFinite(&'static str),

    /// A configuration or perturbation parameter is out of its domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A coupling write would break symmetry, non-negativity, or the zero diagonal.
    #[error("invalid coupling: {0}")]
    InvalidCoupling(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, IsingError>;
