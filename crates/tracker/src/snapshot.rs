//! Snapshot form of an execution, as shown to observers.

use jobdeck_core::{
    ExecutionId, ExecutionRecord, ExecutionStatus, InstanceId, JobParams, Timestamp,
};
use serde::Serialize;

/// Immutable point-in-time view of one execution.
///
/// Produced fresh on every mapping: each consumer owns its copy and
/// nothing is shared with the engine's store. Serializes with camelCase
/// field names for the HTTP surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionSnapshot {
    pub execution_id: ExecutionId,
    pub job_instance_id: InstanceId,
    pub job_name: String,
    pub status: ExecutionStatus,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    /// Exit signal fields stay null until the run produces one.
    pub exit_code: Option<String>,
    pub exit_description: Option<String>,
    pub parameters: JobParams,
}

impl ExecutionSnapshot {
    /// Map an engine record to its snapshot form.
    pub fn from_record(record: &ExecutionRecord) -> Self {
        Self {
            execution_id: record.execution_id,
            job_instance_id: record.instance_id,
            job_name: record.job_name.clone(),
            status: record.status,
            start_time: record.start_time,
            end_time: record.end_time,
            exit_code: record.exit_status.as_ref().map(|e| e.code.clone()),
            exit_description: record.exit_status.as_ref().map(|e| e.description.clone()),
            parameters: record.params.clone(),
        }
    }

    /// Whether this snapshot describes a finished run.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
