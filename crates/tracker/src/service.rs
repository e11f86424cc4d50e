//! Launch and point-query service over the execution engine.

use std::sync::Arc;

use chrono::Utc;
use jobdeck_core::{
    ExecutionEngine, ExecutionId, JobParams, LaunchError, ParamValue, QueryError,
    PARAM_LAUNCH_TIME,
};

use crate::broadcaster::{Subscription, UpdateBroadcaster};
use crate::snapshot::ExecutionSnapshot;

/// Launches jobs and answers point queries, speaking snapshots on one
/// side and engine records on the other.
///
/// Shared as `Arc<JobService<..>>`; all methods take `&self`.
pub struct JobService<E> {
    engine: Arc<E>,
    broadcaster: Arc<UpdateBroadcaster>,
}

impl<E: ExecutionEngine> JobService<E> {
    pub fn new(engine: Arc<E>, broadcaster: Arc<UpdateBroadcaster>) -> Self {
        Self {
            engine,
            broadcaster,
        }
    }

    /// Launch `job_name` with the given raw parameters.
    ///
    /// Values are coerced to the engine's scalar types (unsupported values
    /// are dropped), and `launchTime` is injected when absent so that two
    /// otherwise identical launches never collide on instance identity.
    /// The accepted execution is published to the update stream and
    /// returned; acceptance does not await completion.
    pub async fn launch(
        &self,
        job_name: &str,
        raw_params: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<ExecutionSnapshot, LaunchError> {
        let mut params = JobParams::from_json(raw_params);
        if !params.contains(PARAM_LAUNCH_TIME) {
            params.insert(
                PARAM_LAUNCH_TIME,
                ParamValue::Long(Utc::now().timestamp_millis()),
            );
        }

        tracing::info!(job = %job_name, params = ?params, "Launching job");

        let record = match self.engine.run(job_name, params.clone()).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(job = %job_name, params = ?params, error = %e, "Launch rejected");
                return Err(e);
            }
        };

        let snapshot = ExecutionSnapshot::from_record(&record);
        tracing::info!(
            job = %job_name,
            execution_id = snapshot.execution_id,
            "Job launched; initial update published",
        );
        self.broadcaster.publish(snapshot.clone());
        Ok(snapshot)
    }

    /// Executions of the job currently in a non-terminal state.
    pub async fn running_executions(
        &self,
        job_name: &str,
    ) -> Result<Vec<ExecutionSnapshot>, QueryError> {
        let records = self.engine.running_executions(job_name).await?;
        Ok(records.iter().map(ExecutionSnapshot::from_record).collect())
    }

    /// The `count` globally most recent executions of the job.
    ///
    /// Gathers every execution across every instance of the job name,
    /// sorts by creation time descending, and truncates after the global
    /// sort, never per instance.
    pub async fn recent_executions(
        &self,
        job_name: &str,
        count: usize,
    ) -> Result<Vec<ExecutionSnapshot>, QueryError> {
        let mut records = Vec::new();
        for instance_id in self.engine.instance_ids(job_name).await? {
            records.extend(self.engine.executions_for_instance(instance_id).await?);
        }

        records.sort_by(|a, b| b.create_time.cmp(&a.create_time));
        records.truncate(count);

        Ok(records.iter().map(ExecutionSnapshot::from_record).collect())
    }

    /// Direct lookup by execution id; absence is a normal result.
    pub async fn execution_by_id(
        &self,
        execution_id: ExecutionId,
    ) -> Result<Option<ExecutionSnapshot>, QueryError> {
        let record = self.engine.execution_record(execution_id).await?;
        Ok(record.as_ref().map(ExecutionSnapshot::from_record))
    }

    /// Attach a subscriber to the live update stream. The latest known
    /// snapshot is replayed first.
    pub fn subscribe(&self) -> Subscription {
        self.broadcaster.subscribe()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
