//! Error types for platform collaborators.

use thiserror::Error;

/// Errors raised by job runners and file catalogs.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// A job could not be submitted.
    #[error("failed to execute processor '{processor}': {message}")]
    Execution { processor: String, message: String },

    /// A job's output payload is missing or unparseable.
    #[error("invalid output payload for job {job_id}: {message}")]
    Payload { job_id: String, message: String },

    /// The job id is unknown to this runner.
    #[error("unknown job id: {0}")]
    UnknownJob(String),

    /// Catalog operation failed.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Underlying I/O failure.
    #[error("platform I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
