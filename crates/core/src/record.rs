//! The engine's record of one run attempt.

use crate::params::JobParams;
use crate::status::{ExecutionStatus, ExitStatus};
use crate::types::{ExecutionId, InstanceId, Timestamp};

/// One run attempt of a job, as held by the engine's execution store.
///
/// Records are handed out by value: every reader owns its copy, and the
/// store remains the single place where records mutate.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionRecord {
    pub execution_id: ExecutionId,
    pub instance_id: InstanceId,
    pub job_name: String,
    pub status: ExecutionStatus,
    /// Stamped when the engine accepts the launch.
    pub create_time: Timestamp,
    /// Set once the run task has begun executing.
    pub start_time: Option<Timestamp>,
    /// Set exactly once, when the run reaches a terminal state.
    pub end_time: Option<Timestamp>,
    /// Exit signal; absent until the run produces one.
    pub exit_status: Option<ExitStatus>,
    pub params: JobParams,
}
