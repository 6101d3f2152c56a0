//! Error types for the flood pipeline.

use platform::JobStatus;
use thiserror::Error;

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A required run parameter is missing or invalid.
    #[error("validation error: {0}")]
    Validation(String),

    /// A delegated remote job finished with a non-success status.
    /// Always aborts the run.
    #[error("processor '{processor}' failed with status {status}")]
    RemoteJob {
        processor: String,
        status: JobStatus,
    },

    /// The classifier failed; surfaced to callers after the classifier
    /// itself has caught and logged the underlying cause.
    #[error("flood map classification failed: {0}")]
    Classification(String),

    /// A mask was applied or aligned against a grid in a different CRS.
    #[error("CRS mismatch: mask is {src} but target grid is {dst}")]
    CrsMismatch { src: String, dst: String },

    /// Grid file could not be read or written.
    #[error(transparent)]
    Codec(#[from] raster_codec::CodecError),

    /// Collaborator (job runner / catalog) failure.
    #[error(transparent)]
    Platform(#[from] platform::PlatformError),

    /// Raster shape or transform violation.
    #[error(transparent)]
    Raster(#[from] raster_core::RasterError),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
