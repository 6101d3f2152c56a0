//! Error types for the grid codec.

use thiserror::Error;

/// Errors that can occur while reading or writing grid files.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The input path does not exist.
    #[error("grid file not found: {0}")]
    NotFound(String),

    /// The file exists but cannot be parsed as a georeferenced grid.
    #[error("malformed grid file: {0}")]
    Format(String),

    /// Underlying I/O failure.
    #[error("grid I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data being written is inconsistent with its profile.
    #[error(transparent)]
    Raster(#[from] raster_core::RasterError),
}

impl CodecError {
    /// Create a Format error.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
