//! Job definitions and the registry the engine launches from.
//!
//! A [`JobSpec`] couples a job name with its workload and launch policy
//! (restartability, required parameters). The [`JobRegistry`] is built once
//! at startup and is immutable afterwards, so lookups need no locking.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use jobdeck_core::{ExecutionId, JobParams};
use tokio_util::sync::CancellationToken;

/// Everything a workload gets to see while it runs.
#[derive(Debug, Clone)]
pub struct WorkContext {
    /// Id of the execution this run belongs to.
    pub execution_id: ExecutionId,
    /// The launch parameters, including the injected ones.
    pub params: JobParams,
    /// Cancelled when a stop has been requested. Workloads that want to
    /// shut down cleanly should observe it between units of work.
    pub cancel: CancellationToken,
}

/// How a workload run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkOutcome {
    /// The workload ran to completion.
    Completed,
    /// The workload hit an application failure.
    Failed(String),
    /// The workload halted itself before natural completion.
    Stopped(String),
}

/// The unit of work behind a job name.
///
/// `execute` is called once per execution, on the engine's run task.
pub trait Workload: Send + Sync {
    fn execute(&self, ctx: WorkContext) -> Pin<Box<dyn Future<Output = WorkOutcome> + Send>>;
}

/// A registered job: name, workload, and launch policy.
pub struct JobSpec {
    name: String,
    restartable: bool,
    required_params: Vec<String>,
    workload: Arc<dyn Workload>,
}

impl JobSpec {
    /// Create a spec with the default policy: restartable, no required
    /// parameters.
    pub fn new(name: impl Into<String>, workload: impl Workload + 'static) -> Self {
        Self {
            name: name.into(),
            restartable: true,
            required_params: Vec::new(),
            workload: Arc::new(workload),
        }
    }

    /// Set whether a new execution may be launched after a failed or
    /// stopped one.
    pub fn restartable(mut self, restartable: bool) -> Self {
        self.restartable = restartable;
        self
    }

    /// Require a parameter to be present at launch time.
    pub fn require_param(mut self, name: impl Into<String>) -> Self {
        self.required_params.push(name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_restartable(&self) -> bool {
        self.restartable
    }

    pub fn required_params(&self) -> &[String] {
        &self.required_params
    }

    pub fn workload(&self) -> Arc<dyn Workload> {
        Arc::clone(&self.workload)
    }
}

impl std::fmt::Debug for JobSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobSpec")
            .field("name", &self.name)
            .field("restartable", &self.restartable)
            .field("required_params", &self.required_params)
            .finish_non_exhaustive()
    }
}

/// Lookup table of launchable jobs, keyed by name.
#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: HashMap<String, Arc<JobSpec>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job. A spec registered under an existing name replaces
    /// the previous one.
    pub fn register(&mut self, spec: JobSpec) {
        self.jobs.insert(spec.name().to_string(), Arc::new(spec));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<JobSpec>> {
        self.jobs.get(name)
    }

    /// Names of every registered job, sorted for stable output.
    pub fn job_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.jobs.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
