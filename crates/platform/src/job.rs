//! Remote job execution seam.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Opaque handle for a submitted remote job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(String);

impl JobId {
    /// Create from the runner's identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Terminal and intermediate states of a remote job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Created,
    Running,
    Waiting,
    Done,
    Error,
    Stopped,
}

impl JobStatus {
    /// Parse from the runner's status string (case-insensitive).
    /// Unknown strings map to `Error`.
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "CREATED" => Self::Created,
            "RUNNING" => Self::Running,
            "WAITING" => Self::Waiting,
            "DONE" => Self::Done,
            "STOPPED" => Self::Stopped,
            _ => Self::Error,
        }
    }

    /// Get the status name as the runner's wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Running => "RUNNING",
            Self::Waiting => "WAITING",
            Self::Done => "DONE",
            Self::Error => "ERROR",
            Self::Stopped => "STOPPED",
        }
    }

    /// True only for successful completion.
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Blocking interface to an out-of-process job executor.
///
/// The pipeline issues a call and blocks until it completes or fails;
/// there is no cancellation and no concurrent dispatch.
pub trait JobRunner {
    /// Submit a named processor with a parameter dictionary.
    fn execute(&self, processor: &str, params: &serde_json::Value) -> Result<JobId>;

    /// Block until the job reaches a terminal state and return it.
    fn wait(&self, job: &JobId) -> Result<JobStatus>;

    /// Fetch the structured output payload of a finished job.
    fn output_payload(&self, job: &JobId) -> Result<serde_json::Value>;
}

/// A runner for deployments without a remote job endpoint.
///
/// Every submission fails with an [`PlatformError::Execution`] naming the
/// processor, so a run that needs remote work aborts with a clear message
/// instead of hanging.
#[derive(Debug, Default)]
pub struct OfflineRunner;

impl JobRunner for OfflineRunner {
    fn execute(&self, processor: &str, _params: &serde_json::Value) -> Result<JobId> {
        Err(crate::PlatformError::Execution {
            processor: processor.to_string(),
            message: "no remote job endpoint configured".to_string(),
        })
    }

    fn wait(&self, job: &JobId) -> Result<JobStatus> {
        Err(crate::PlatformError::UnknownJob(job.to_string()))
    }

    fn output_payload(&self, job: &JobId) -> Result<serde_json::Value> {
        Err(crate::PlatformError::UnknownJob(job.to_string()))
    }
}
