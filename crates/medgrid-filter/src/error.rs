//! Error types for medgrid-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] medgrid_core::Error),

    /// Invalid kernel size
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Zero width/height, or a buffer that does not hold `width * height` samples
    #[error("invalid dimensions: {width}x{height} with {len} samples")]
    InvalidDimensions {
        /// Grid width
        width: usize,
        /// Grid height
        height: usize,
        /// Length of the offending buffer
        len: usize,
    },

    /// Scratch or output storage could not be obtained
    #[error("allocation of {requested} samples failed")]
    AllocationFailed {
        /// Number of `u16` samples requested
        requested: usize,
    },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
