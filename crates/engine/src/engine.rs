//! The batch engine: admission, the run task, and shutdown.
//!
//! `run` admits an execution, records it as `Starting`, spawns the run
//! task, and returns the `Starting` record without waiting for the
//! workload. The run task drives the record through
//! `Started -> Running -> terminal`, invoking the registered lifecycle
//! listeners on the way: `before_run` once the execution has started,
//! `after_run` exactly once at the terminal transition.

use std::sync::Arc;

use chrono::Utc;
use jobdeck_core::{
    ExecutionEngine, ExecutionId, ExecutionListener, ExecutionRecord, ExecutionStatus, ExitStatus,
    InstanceId, JobParams, LaunchError, QueryError,
};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::registry::{JobRegistry, WorkContext, WorkOutcome, Workload};
use crate::store::ExecutionStore;

pub struct BatchEngine {
    registry: JobRegistry,
    store: Arc<ExecutionStore>,
    listeners: Vec<Arc<dyn ExecutionListener>>,
    tasks: TaskTracker,
    shutdown: CancellationToken,
}

impl BatchEngine {
    pub fn new(registry: JobRegistry) -> Self {
        Self {
            registry,
            store: Arc::new(ExecutionStore::new()),
            listeners: Vec::new(),
            tasks: TaskTracker::new(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Attach a lifecycle listener. Listeners are invoked in registration
    /// order, on the run task of each execution.
    pub fn add_listener(&mut self, listener: Arc<dyn ExecutionListener>) {
        self.listeners.push(listener);
    }

    /// Names of every registered job, sorted.
    pub fn job_names(&self) -> Vec<String> {
        self.registry.job_names()
    }

    /// Request a stop of all in-flight executions and wait until each has
    /// reached its terminal state and its `after_run` hooks have fired.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        self.tasks.close();
        self.tasks.wait().await;
    }

    fn validate_params(
        &self,
        job_name: &str,
        required: &[String],
        params: &JobParams,
    ) -> Result<(), LaunchError> {
        for name in required {
            if !params.contains(name) {
                return Err(LaunchError::InvalidParameters {
                    job_name: job_name.to_string(),
                    reason: format!("missing required parameter '{name}'"),
                });
            }
        }
        Ok(())
    }
}

impl ExecutionEngine for BatchEngine {
    async fn run(&self, job_name: &str, params: JobParams) -> Result<ExecutionRecord, LaunchError> {
        let spec = self
            .registry
            .get(job_name)
            .ok_or_else(|| LaunchError::JobNotFound(job_name.to_string()))?;

        self.validate_params(job_name, spec.required_params(), &params)?;

        let identity =
            serde_json::to_string(&params).map_err(|e| LaunchError::InvalidParameters {
                job_name: job_name.to_string(),
                reason: format!("parameters are not serializable: {e}"),
            })?;

        let record = self
            .store
            .admit_run(job_name, &identity, spec.is_restartable(), params, Utc::now())
            .await?;

        tracing::info!(
            execution_id = record.execution_id,
            instance_id = record.instance_id,
            job = %job_name,
            "Execution accepted",
        );

        let store = Arc::clone(&self.store);
        let listeners = self.listeners.clone();
        let workload = spec.workload();
        let cancel = self.shutdown.child_token();
        let execution_id = record.execution_id;
        self.tasks.spawn(async move {
            drive_execution(store, listeners, workload, cancel, execution_id).await;
        });

        Ok(record)
    }

    async fn running_executions(&self, job_name: &str) -> Result<Vec<ExecutionRecord>, QueryError> {
        Ok(self.store.running_for_job(job_name).await)
    }

    async fn instance_ids(&self, job_name: &str) -> Result<Vec<InstanceId>, QueryError> {
        Ok(self.store.instance_ids(job_name).await)
    }

    async fn executions_for_instance(
        &self,
        instance_id: InstanceId,
    ) -> Result<Vec<ExecutionRecord>, QueryError> {
        Ok(self.store.executions_for_instance(instance_id).await)
    }

    async fn execution_record(
        &self,
        execution_id: ExecutionId,
    ) -> Result<Option<ExecutionRecord>, QueryError> {
        Ok(self.store.execution(execution_id).await)
    }
}

/// Drive one execution from `Started` to its terminal state.
async fn drive_execution(
    store: Arc<ExecutionStore>,
    listeners: Vec<Arc<dyn ExecutionListener>>,
    workload: Arc<dyn Workload>,
    cancel: CancellationToken,
    execution_id: ExecutionId,
) {
    let Some(record) = store
        .update_execution(execution_id, |r| {
            r.status = ExecutionStatus::Started;
            r.start_time = Some(Utc::now());
        })
        .await
    else {
        tracing::error!(execution_id, "Execution record missing at start");
        return;
    };

    tracing::info!(execution_id, job = %record.job_name, "Execution started");
    for listener in &listeners {
        listener.before_run(&record);
    }

    let Some(record) = store
        .update_execution(execution_id, |r| r.status = ExecutionStatus::Running)
        .await
    else {
        tracing::error!(execution_id, "Execution record missing before workload");
        return;
    };

    let ctx = WorkContext {
        execution_id,
        params: record.params.clone(),
        cancel: cancel.clone(),
    };
    // The select! guarantees a terminal transition on shutdown even for
    // workloads that never look at the token.
    let outcome = tokio::select! {
        _ = cancel.cancelled() => WorkOutcome::Stopped("stop requested".to_string()),
        outcome = workload.execute(ctx) => outcome,
    };

    let (status, exit_status) = match outcome {
        WorkOutcome::Completed => (ExecutionStatus::Completed, ExitStatus::completed()),
        WorkOutcome::Failed(description) => {
            (ExecutionStatus::Failed, ExitStatus::failed(description))
        }
        WorkOutcome::Stopped(description) => {
            (ExecutionStatus::Stopped, ExitStatus::stopped(description))
        }
    };

    let Some(record) = store
        .update_execution(execution_id, |r| {
            r.status = status;
            r.end_time = Some(Utc::now());
            r.exit_status = Some(exit_status);
        })
        .await
    else {
        tracing::error!(execution_id, "Execution record missing at finish");
        return;
    };

    tracing::info!(
        execution_id,
        job = %record.job_name,
        status = %record.status,
        "Execution finished",
    );
    for listener in &listeners {
        listener.after_run(&record);
    }
}
