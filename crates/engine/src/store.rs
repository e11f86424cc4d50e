//! In-memory execution store.
//!
//! Instances and executions live behind a single `RwLock`, so the
//! admission check and the creation of the new execution happen in one
//! write-lock critical section. Two concurrent launches of the same
//! instance can therefore never both pass the running check.

use std::collections::HashMap;

use jobdeck_core::{
    ExecutionId, ExecutionRecord, ExecutionStatus, InstanceId, JobParams, LaunchError, Timestamp,
};
use tokio::sync::RwLock;

/// Instance identity: the job name plus the canonical rendering of the
/// full parameter set.
type InstanceKey = (String, String);

#[derive(Default)]
struct StoreInner {
    next_instance_id: InstanceId,
    next_execution_id: ExecutionId,
    instances_by_identity: HashMap<InstanceKey, InstanceId>,
    /// Instance ids per job name, newest first.
    instances_by_job: HashMap<String, Vec<InstanceId>>,
    executions: HashMap<ExecutionId, ExecutionRecord>,
    /// Execution ids per instance, newest first.
    executions_by_instance: HashMap<InstanceId, Vec<ExecutionId>>,
}

pub struct ExecutionStore {
    inner: RwLock<StoreInner>,
}

impl ExecutionStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                next_instance_id: 1,
                next_execution_id: 1,
                ..StoreInner::default()
            }),
        }
    }

    /// Admit a new run of `job_name` with the given parameter identity.
    ///
    /// Reuses the existing instance when one matches the identity,
    /// enforcing the launch constraints against its execution history:
    ///
    /// - a non-terminal execution blocks the launch as already running,
    /// - a completed execution blocks it as already complete,
    /// - anything else (failed or stopped history) requires the job to be
    ///   restartable.
    ///
    /// On success the new execution is recorded with status
    /// [`ExecutionStatus::Starting`] and returned.
    pub async fn admit_run(
        &self,
        job_name: &str,
        identity: &str,
        restartable: bool,
        params: JobParams,
        create_time: Timestamp,
    ) -> Result<ExecutionRecord, LaunchError> {
        let mut inner = self.inner.write().await;

        let key: InstanceKey = (job_name.to_string(), identity.to_string());
        let instance_id = match inner.instances_by_identity.get(&key).copied() {
            Some(instance_id) => {
                let mut has_active = false;
                let mut has_completed = false;
                if let Some(ids) = inner.executions_by_instance.get(&instance_id) {
                    for id in ids {
                        if let Some(record) = inner.executions.get(id) {
                            has_active |= !record.status.is_terminal();
                            has_completed |= record.status == ExecutionStatus::Completed;
                        }
                    }
                }

                if has_active {
                    return Err(LaunchError::AlreadyRunning(job_name.to_string()));
                }
                if has_completed {
                    return Err(LaunchError::AlreadyComplete(job_name.to_string()));
                }
                if !restartable {
                    return Err(LaunchError::RestartNotAllowed(job_name.to_string()));
                }
                instance_id
            }
            None => {
                let instance_id = inner.next_instance_id;
                inner.next_instance_id += 1;
                inner.instances_by_identity.insert(key, instance_id);
                inner
                    .instances_by_job
                    .entry(job_name.to_string())
                    .or_default()
                    .insert(0, instance_id);
                instance_id
            }
        };

        let execution_id = inner.next_execution_id;
        inner.next_execution_id += 1;

        let record = ExecutionRecord {
            execution_id,
            instance_id,
            job_name: job_name.to_string(),
            status: ExecutionStatus::Starting,
            create_time,
            start_time: None,
            end_time: None,
            exit_status: None,
            params,
        };
        inner.executions.insert(execution_id, record.clone());
        inner
            .executions_by_instance
            .entry(instance_id)
            .or_default()
            .insert(0, execution_id);

        Ok(record)
    }

    /// Apply a mutation to one execution and return the updated record.
    ///
    /// Returns `None` when no execution exists under the id.
    pub async fn update_execution<F>(
        &self,
        execution_id: ExecutionId,
        apply: F,
    ) -> Option<ExecutionRecord>
    where
        F: FnOnce(&mut ExecutionRecord),
    {
        let mut inner = self.inner.write().await;
        let record = inner.executions.get_mut(&execution_id)?;
        apply(record);
        Some(record.clone())
    }

    pub async fn execution(&self, execution_id: ExecutionId) -> Option<ExecutionRecord> {
        self.inner.read().await.executions.get(&execution_id).cloned()
    }

    /// Non-terminal executions of the job, newest first.
    pub async fn running_for_job(&self, job_name: &str) -> Vec<ExecutionRecord> {
        let inner = self.inner.read().await;
        let mut running: Vec<ExecutionRecord> = inner
            .executions
            .values()
            .filter(|r| r.job_name == job_name && !r.status.is_terminal())
            .cloned()
            .collect();
        running.sort_by(|a, b| b.execution_id.cmp(&a.execution_id));
        running
    }

    /// Instance ids of the job, newest first.
    pub async fn instance_ids(&self, job_name: &str) -> Vec<InstanceId> {
        self.inner
            .read()
            .await
            .instances_by_job
            .get(job_name)
            .cloned()
            .unwrap_or_default()
    }

    /// Every execution of one instance, newest first.
    pub async fn executions_for_instance(&self, instance_id: InstanceId) -> Vec<ExecutionRecord> {
        let inner = self.inner.read().await;
        inner
            .executions_by_instance
            .get(&instance_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| inner.executions.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for ExecutionStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
