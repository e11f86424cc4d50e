//! Execution-engine interface.
//!
//! The batch engine is an external collaborator to the tracking subsystem.
//! This module pins down the boundary the tracker consumes: the launch
//! operation, the execution-store reads, and the lifecycle-listener
//! capability the engine invokes around each run.

use std::future::Future;

use crate::params::JobParams;
use crate::record::ExecutionRecord;
use crate::types::{ExecutionId, InstanceId};

/// Launch-time failures. Each constraint surfaces as its own variant and
/// is propagated to the caller unchanged, never collapsed.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// No job is registered under the given name.
    #[error("no job registered under name '{0}'")]
    JobNotFound(String),

    /// An execution of the same instance is still in a non-terminal state.
    #[error("job '{0}' already has a running execution for these parameters")]
    AlreadyRunning(String),

    /// The instance identified by these parameters has already completed.
    #[error("job '{0}' already completed for these parameters")]
    AlreadyComplete(String),

    /// A previous execution did not complete and the job forbids restarts.
    #[error("job '{0}' is not restartable after an incomplete execution")]
    RestartNotAllowed(String),

    /// The parameter set violates the job's launch constraints.
    #[error("invalid parameters for job '{job_name}': {reason}")]
    InvalidParameters { job_name: String, reason: String },
}

/// The execution store could not serve a read.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("execution store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Lifecycle observer invoked by the engine on the executing task:
/// `before_run` immediately before the workload executes, `after_run`
/// exactly once when the run reaches a terminal state. Stops are ordinary
/// terminal notifications.
pub trait ExecutionListener: Send + Sync {
    fn before_run(&self, record: &ExecutionRecord);
    fn after_run(&self, record: &ExecutionRecord);
}

/// Operations the engine exposes to the tracking subsystem.
pub trait ExecutionEngine: Send + Sync {
    /// Launch a run of the named job.
    ///
    /// Returns once the engine has accepted and scheduled the run, not
    /// once the run completes. Completion is observed via
    /// [`ExecutionListener`] hooks, never through this return value.
    fn run(
        &self,
        job_name: &str,
        params: JobParams,
    ) -> impl Future<Output = Result<ExecutionRecord, LaunchError>> + Send;

    /// Executions currently in a non-terminal state for the job name.
    fn running_executions(
        &self,
        job_name: &str,
    ) -> impl Future<Output = Result<Vec<ExecutionRecord>, QueryError>> + Send;

    /// Ids of every instance of the job name, newest first.
    fn instance_ids(
        &self,
        job_name: &str,
    ) -> impl Future<Output = Result<Vec<InstanceId>, QueryError>> + Send;

    /// Every execution of one instance.
    fn executions_for_instance(
        &self,
        instance_id: InstanceId,
    ) -> impl Future<Output = Result<Vec<ExecutionRecord>, QueryError>> + Send;

    /// Direct record lookup; absence is a normal result, not an error.
    fn execution_record(
        &self,
        execution_id: ExecutionId,
    ) -> impl Future<Output = Result<Option<ExecutionRecord>, QueryError>> + Send;
}
