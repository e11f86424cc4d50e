/// Execution ids are assigned by the engine from a monotonic sequence and
/// never reused.
pub type ExecutionId = i64;

/// Instance ids identify one logical job invocation (job name + parameter
/// set); retries of the same invocation share an instance id.
pub type InstanceId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
