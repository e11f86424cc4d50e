//! Shared fixtures for the crate's unit tests.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use jobdeck_core::{
    ExecutionEngine, ExecutionId, ExecutionRecord, ExecutionStatus, InstanceId, JobParams,
    LaunchError, QueryError, Timestamp,
};

/// Timestamp fixture: `secs` after the epoch.
pub(crate) fn ts(secs: i64) -> Timestamp {
    DateTime::from_timestamp(secs, 0).expect("valid test timestamp")
}

/// Minimal record fixture; tests adjust fields as needed.
pub(crate) fn record(
    execution_id: ExecutionId,
    instance_id: InstanceId,
    job_name: &str,
    status: ExecutionStatus,
) -> ExecutionRecord {
    ExecutionRecord {
        execution_id,
        instance_id,
        job_name: job_name.to_string(),
        status,
        create_time: ts(0),
        start_time: None,
        end_time: None,
        exit_status: None,
        params: JobParams::new(),
    }
}

/// Scripted engine stand-in.
///
/// Launching a known job synthesizes a `Starting` record; reads answer
/// from the seeded record set. Jobs listed as failing answer every named
/// query with a store failure.
pub(crate) struct StubEngine {
    known_jobs: Vec<&'static str>,
    failing_jobs: Vec<&'static str>,
    state: Mutex<StubState>,
}

struct StubState {
    next_execution_id: ExecutionId,
    records: Vec<ExecutionRecord>,
}

impl StubEngine {
    pub(crate) fn new(jobs: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            known_jobs: jobs.into_iter().collect(),
            failing_jobs: Vec::new(),
            state: Mutex::new(StubState {
                next_execution_id: 1000,
                records: Vec::new(),
            }),
        }
    }

    pub(crate) fn with_records(self, records: impl IntoIterator<Item = ExecutionRecord>) -> Self {
        self.state.lock().unwrap().records.extend(records);
        self
    }

    pub(crate) fn with_failing_jobs(
        mut self,
        jobs: impl IntoIterator<Item = &'static str>,
    ) -> Self {
        self.failing_jobs.extend(jobs);
        self
    }

    fn check_available(&self, job_name: &str) -> Result<(), QueryError> {
        if self.failing_jobs.iter().any(|j| *j == job_name) {
            return Err(QueryError::StoreUnavailable(format!(
                "stub store offline for '{job_name}'"
            )));
        }
        Ok(())
    }
}

impl ExecutionEngine for StubEngine {
    async fn run(&self, job_name: &str, params: JobParams) -> Result<ExecutionRecord, LaunchError> {
        if !self.known_jobs.iter().any(|j| *j == job_name) {
            return Err(LaunchError::JobNotFound(job_name.to_string()));
        }
        let mut state = self.state.lock().unwrap();
        let execution_id = state.next_execution_id;
        state.next_execution_id += 1;
        let record = ExecutionRecord {
            execution_id,
            instance_id: execution_id,
            job_name: job_name.to_string(),
            status: ExecutionStatus::Starting,
            create_time: Utc::now(),
            start_time: None,
            end_time: None,
            exit_status: None,
            params,
        };
        state.records.push(record.clone());
        Ok(record)
    }

    async fn running_executions(&self, job_name: &str) -> Result<Vec<ExecutionRecord>, QueryError> {
        self.check_available(job_name)?;
        let state = self.state.lock().unwrap();
        Ok(state
            .records
            .iter()
            .filter(|r| r.job_name == job_name && !r.status.is_terminal())
            .cloned()
            .collect())
    }

    async fn instance_ids(&self, job_name: &str) -> Result<Vec<InstanceId>, QueryError> {
        self.check_available(job_name)?;
        let state = self.state.lock().unwrap();
        let mut ids = Vec::new();
        for record in state.records.iter().filter(|r| r.job_name == job_name) {
            if !ids.contains(&record.instance_id) {
                ids.push(record.instance_id);
            }
        }
        Ok(ids)
    }

    async fn executions_for_instance(
        &self,
        instance_id: InstanceId,
    ) -> Result<Vec<ExecutionRecord>, QueryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .records
            .iter()
            .filter(|r| r.instance_id == instance_id)
            .cloned()
            .collect())
    }

    async fn execution_record(
        &self,
        execution_id: ExecutionId,
    ) -> Result<Option<ExecutionRecord>, QueryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .records
            .iter()
            .find(|r| r.execution_id == execution_id)
            .cloned())
    }
}
