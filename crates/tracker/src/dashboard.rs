//! Aggregated dashboard view over a configured set of jobs.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use jobdeck_core::{ExecutionEngine, ExecutionId, Timestamp};

use crate::snapshot::ExecutionSnapshot;

/// Builds the dashboard snapshot: the running executions of a fixed,
/// injected set of job names, deduplicated and consistently ordered.
pub struct DashboardAggregator<E> {
    engine: Arc<E>,
    job_names: Vec<String>,
}

impl<E: ExecutionEngine> DashboardAggregator<E> {
    pub fn new(engine: Arc<E>, job_names: Vec<String>) -> Self {
        Self { engine, job_names }
    }

    /// The job names this aggregator watches, in configured order.
    pub fn job_names(&self) -> &[String] {
        &self.job_names
    }

    /// One consistent view of everything currently running.
    ///
    /// Queries each configured job in order; a job whose query fails is
    /// skipped with a warning and the view is built from the jobs that
    /// answered. Overlapping results are deduplicated by execution id
    /// (first occurrence wins), then ordered most recently started first,
    /// not-yet-started executions last.
    pub async fn snapshot(&self) -> Vec<ExecutionSnapshot> {
        let mut by_id: BTreeMap<ExecutionId, ExecutionSnapshot> = BTreeMap::new();

        for job_name in &self.job_names {
            match self.engine.running_executions(job_name).await {
                Ok(records) => {
                    for record in &records {
                        by_id
                            .entry(record.execution_id)
                            .or_insert_with(|| ExecutionSnapshot::from_record(record));
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        job = %job_name,
                        error = %e,
                        "Skipping job in dashboard snapshot",
                    );
                }
            }
        }

        let mut snapshot: Vec<ExecutionSnapshot> = by_id.into_values().collect();
        snapshot.sort_by(|a, b| start_time_desc_nulls_last(a.start_time, b.start_time));
        snapshot
    }
}

/// Most recent start first; executions that have not started yet sort
/// after everything that has.
fn start_time_desc_nulls_last(a: Option<Timestamp>, b: Option<Timestamp>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
