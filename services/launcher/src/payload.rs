//! Run payload: the structured report emitted at the end of a run.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RunParameters;

/// Job ids of the remote runs this pipeline invocation triggered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunRecords {
    /// DEM extraction job, when one was run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dem_proc_id: Option<String>,
    /// Hydraulic model job, when one was run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_proc_id: Option<String>,
}

/// End-of-run report: the input parameters, the remote jobs launched, and
/// the final output products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunPayload {
    /// Echo of the run parameters.
    pub input: RunParameters,
    /// Remote job ids.
    pub runs: RunRecords,
    /// Named final outputs (e.g. "WaterDepth" → product name).
    pub final_output: BTreeMap<String, String>,
    /// Completion timestamp.
    pub completed_at: DateTime<Utc>,
}

impl RunPayload {
    /// Start a payload from the input parameter echo.
    pub fn new(input: RunParameters) -> Self {
        Self {
            input,
            runs: RunRecords::default(),
            final_output: BTreeMap::new(),
            completed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_serialization() {
        let params = RunParameters {
            floodmap: "event_FM.ngr".to_string(),
            ..Default::default()
        };
        let mut payload = RunPayload::new(params);
        payload.runs.model_proc_id = Some("job-7".to_string());
        payload
            .final_output
            .insert("WaterDepth".to_string(), "event_WDM.ngr".to_string());

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["input"]["floodmap"], "event_FM.ngr");
        assert_eq!(value["runs"]["model_proc_id"], "job-7");
        assert_eq!(value["final_output"]["WaterDepth"], "event_WDM.ngr");
        // Unset job ids are omitted entirely.
        assert!(value["runs"].get("dem_proc_id").is_none());
    }
}
