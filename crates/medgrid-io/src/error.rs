//! I/O error types
//!
//! Provides a unified error type for all capture I/O operations.
//! Each format module maps its underlying library errors into `IoError`
//! variants so that callers only need to handle one error type.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for capture I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raw file byte count does not match the declared dimensions
    #[error("raw size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The image layout is not supported
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A format-specific decoder returned an error
    #[error("decode error: {0}")]
    DecodeError(String),

    /// A format-specific encoder returned an error
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Batch input path is not a directory
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// An error from the core library (e.g. invalid dimensions)
    #[error("core error: {0}")]
    Core(#[from] medgrid_core::Error),

    /// Filtering failed during a conversion pipeline
    #[error("filter error: {0}")]
    Filter(#[from] medgrid_filter::FilterError),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
