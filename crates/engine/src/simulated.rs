//! Built-in simulated jobs.
//!
//! Five launchable jobs that sleep for `durationInSeconds` and then end
//! in a known way. Three complete, one fails, one stops itself. They give
//! the dashboard and the update stream something real to show without
//! any external workload.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use jobdeck_core::{PARAM_CUSTOM_JOB_NAME, PARAM_DURATION_SECS};

use crate::registry::{JobRegistry, JobSpec, WorkContext, WorkOutcome, Workload};

/// Sleep length when the launch did not carry `durationInSeconds`.
const DEFAULT_DURATION_SECS: i64 = 5;

/// Names of the bundled simulated jobs, in registration order.
pub const SIMULATED_JOB_NAMES: [&str; 5] = [
    "simulatedJob",
    "simulatedJob2",
    "simulatedJob3",
    "simulatedJob4",
    "simulatedJob5",
];

#[derive(Debug, Clone, Copy)]
enum SimulatedEnding {
    Success,
    Failure,
    Stop,
}

/// Workload that sleeps for `durationInSeconds` and then ends as
/// configured.
pub struct SimulatedWorkload {
    ending: SimulatedEnding,
}

impl SimulatedWorkload {
    pub fn succeeding() -> Self {
        Self {
            ending: SimulatedEnding::Success,
        }
    }

    pub fn failing() -> Self {
        Self {
            ending: SimulatedEnding::Failure,
        }
    }

    pub fn stopping() -> Self {
        Self {
            ending: SimulatedEnding::Stop,
        }
    }
}

impl Workload for SimulatedWorkload {
    fn execute(&self, ctx: WorkContext) -> Pin<Box<dyn Future<Output = WorkOutcome> + Send>> {
        let ending = self.ending;
        Box::pin(async move {
            let secs = ctx
                .params
                .get_long(PARAM_DURATION_SECS)
                .unwrap_or(DEFAULT_DURATION_SECS)
                .max(0) as u64;
            let label = ctx
                .params
                .get_string(PARAM_CUSTOM_JOB_NAME)
                .map(str::to_string)
                .unwrap_or_else(|| format!("execution {}", ctx.execution_id));

            tracing::info!(
                execution_id = ctx.execution_id,
                custom_name = %label,
                duration_secs = secs,
                "Simulated work starting",
            );

            tokio::select! {
                _ = ctx.cancel.cancelled() => {
                    tracing::warn!(execution_id = ctx.execution_id, "Simulated work interrupted");
                    return WorkOutcome::Stopped("interrupted during simulated work".to_string());
                }
                _ = tokio::time::sleep(Duration::from_secs(secs)) => {}
            }

            match ending {
                SimulatedEnding::Success => {
                    tracing::info!(execution_id = ctx.execution_id, "Simulated work completed");
                    WorkOutcome::Completed
                }
                SimulatedEnding::Failure => {
                    tracing::error!(execution_id = ctx.execution_id, "Simulated work failing");
                    WorkOutcome::Failed(format!("simulated failure for '{label}'"))
                }
                SimulatedEnding::Stop => {
                    tracing::warn!(execution_id = ctx.execution_id, "Simulated work stopping");
                    WorkOutcome::Stopped(format!("simulated stop for '{label}'"))
                }
            }
        })
    }
}

/// Build a registry pre-loaded with the five simulated jobs.
pub fn simulated_registry() -> JobRegistry {
    let mut registry = JobRegistry::new();
    registry.register(JobSpec::new("simulatedJob", SimulatedWorkload::succeeding()));
    registry.register(JobSpec::new("simulatedJob2", SimulatedWorkload::succeeding()));
    registry.register(JobSpec::new("simulatedJob3", SimulatedWorkload::succeeding()));
    registry.register(JobSpec::new("simulatedJob4", SimulatedWorkload::failing()));
    registry.register(JobSpec::new("simulatedJob5", SimulatedWorkload::stopping()));
    registry
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
