//! Execution lifecycle states and exit signals.

use serde::Serialize;

/// Lifecycle state of one execution, reported 1:1 by the engine.
///
/// `Starting` is assigned at accept time, `Started` once the run task has
/// begun (before the workload executes), `Running` while the workload
/// executes. The remaining three are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    Starting,
    Started,
    Running,
    Completed,
    Failed,
    Stopped,
}

impl ExecutionStatus {
    /// Whether this state is terminal: no further updates are expected for
    /// an execution once it reaches one of these.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Stopped)
    }

    /// Wire/log form of the state (`STARTING`, `COMPLETED`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starting => "STARTING",
            Self::Started => "STARTED",
            Self::Running => "RUNNING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Stopped => "STOPPED",
        }
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exit signal recorded when a run reaches a terminal state.
///
/// Absent (`None` on the record) until the engine produces one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExitStatus {
    /// Machine-readable exit code (`COMPLETED`, `FAILED`, `STOPPED`).
    pub code: String,
    /// Free-form detail: failure message or stop reason, empty on success.
    pub description: String,
}

impl ExitStatus {
    /// Successful completion.
    pub fn completed() -> Self {
        Self {
            code: "COMPLETED".to_string(),
            description: String::new(),
        }
    }

    /// Failure with the workload's error message.
    pub fn failed(description: impl Into<String>) -> Self {
        Self {
            code: "FAILED".to_string(),
            description: description.into(),
        }
    }

    /// Externally or internally requested stop.
    pub fn stopped(description: impl Into<String>) -> Self {
        Self {
            code: "STOPPED".to_string(),
            description: description.into(),
        }
    }
}
