//! Error types for histogram construction and queries
//!
//! Provides a unified error type for the whole crate.

use thiserror::Error;

/// Core error type for histogram operations
#[derive(Error, Debug)]
pub enum Error {
    /// Axis construction rejected its parameters
    #[error("Invalid axis parameters: {0}")]
    InvalidAxis(String),

    /// Number of coordinates or indices does not match the dimension
    #[error("Dimension mismatch: expected {expected} arguments, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Query index outside the legal bin range of an axis
    #[error("Bin index {index} out of range for axis {axis}")]
    IndexOutOfRange { axis: usize, index: i32 },

    /// Operands of an in-place addition differ in axis structure
    #[error("Incompatible axes: {0}")]
    IncompatibleAxes(String),

    /// Duplicate or out-of-range axis index in a projection
    #[error("Invalid reduction: {0}")]
    InvalidReduction(String),

    /// Bin edges requested from an axis without a numeric interval domain
    #[error("Axis has no interval edges: {0}")]
    NoIntervalEdges(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a coordinate/index arity mismatch
    pub fn arity(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create an error for mismatched sequence lengths
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for non-increasing or otherwise malformed bin bounds
    pub fn bad_bounds(context: impl Into<String>) -> Self {
        Self::InvalidAxis(context.into())
    }
}
