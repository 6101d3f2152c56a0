//! Scripted job runner standing in for remote collaborators.

use std::collections::HashMap;
use std::sync::Mutex;

use platform::{JobId, JobRunner, JobStatus, PlatformError};
use serde_json::Value;

type Callback = Box<dyn Fn(&Value) + Send>;

struct Script {
    status: JobStatus,
    payload: Value,
    callback: Option<Callback>,
}

/// A [`JobRunner`] whose responses are scripted per processor name.
///
/// Each scripted processor gets a terminal status, an output payload, and
/// an optional callback invoked at `execute` time with the job parameters;
/// callbacks typically synthesize the output files a real collaborator
/// would produce. Executing an unscripted processor is an error, which
/// doubles as an assertion that a scenario never reaches it.
#[derive(Default)]
pub struct ScriptedJobRunner {
    scripts: Mutex<HashMap<String, Script>>,
    jobs: Mutex<HashMap<String, String>>,
    executed: Mutex<Vec<String>>,
}

impl ScriptedJobRunner {
    /// Create a runner with no scripted processors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a processor with a status and output payload.
    pub fn script(&self, processor: &str, status: JobStatus, payload: Value) {
        self.insert(processor, status, payload, None);
    }

    /// Script a processor that synthesizes outputs via a callback.
    pub fn script_with<F>(&self, processor: &str, status: JobStatus, callback: F)
    where
        F: Fn(&Value) + Send + 'static,
    {
        self.insert(
            processor,
            status,
            Value::Object(Default::default()),
            Some(Box::new(callback)),
        );
    }

    /// Script a processor with payload and callback.
    pub fn script_full<F>(&self, processor: &str, status: JobStatus, payload: Value, callback: F)
    where
        F: Fn(&Value) + Send + 'static,
    {
        self.insert(processor, status, payload, Some(Box::new(callback)));
    }

    /// Names of processors executed so far, in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().expect("runner lock poisoned").clone()
    }

    /// True if the processor was never executed.
    pub fn never_executed(&self, processor: &str) -> bool {
        !self.executed().iter().any(|p| p == processor)
    }

    fn insert(&self, processor: &str, status: JobStatus, payload: Value, callback: Option<Callback>) {
        self.scripts.lock().expect("runner lock poisoned").insert(
            processor.to_string(),
            Script {
                status,
                payload,
                callback,
            },
        );
    }
}

impl JobRunner for ScriptedJobRunner {
    fn execute(&self, processor: &str, params: &Value) -> platform::Result<JobId> {
        self.executed
            .lock()
            .expect("runner lock poisoned")
            .push(processor.to_string());

        let scripts = self.scripts.lock().expect("runner lock poisoned");
        let script = scripts
            .get(processor)
            .ok_or_else(|| PlatformError::Execution {
                processor: processor.to_string(),
                message: "processor not scripted".to_string(),
            })?;

        if let Some(callback) = &script.callback {
            callback(params);
        }

        let mut jobs = self.jobs.lock().expect("runner lock poisoned");
        let id = format!("job-{}", jobs.len() + 1);
        jobs.insert(id.clone(), processor.to_string());
        Ok(JobId::new(id))
    }

    fn wait(&self, job: &JobId) -> platform::Result<JobStatus> {
        let jobs = self.jobs.lock().expect("runner lock poisoned");
        let processor = jobs
            .get(job.as_str())
            .ok_or_else(|| PlatformError::UnknownJob(job.to_string()))?;

        let scripts = self.scripts.lock().expect("runner lock poisoned");
        Ok(scripts[processor].status)
    }

    fn output_payload(&self, job: &JobId) -> platform::Result<Value> {
        let jobs = self.jobs.lock().expect("runner lock poisoned");
        let processor = jobs
            .get(job.as_str())
            .ok_or_else(|| PlatformError::UnknownJob(job.to_string()))?;

        let scripts = self.scripts.lock().expect("runner lock poisoned");
        Ok(scripts[processor].payload.clone())
    }
}
