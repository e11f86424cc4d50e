//! Bridge from engine lifecycle hooks into the update stream.

use std::sync::Arc;

use jobdeck_core::{ExecutionListener, ExecutionRecord};

use crate::broadcaster::UpdateBroadcaster;
use crate::snapshot::ExecutionSnapshot;

/// Forwards engine lifecycle notifications into the broadcaster.
///
/// Registered with the engine at startup. Both hooks map the record they
/// are handed into a fresh snapshot and publish it; a stop notification
/// goes through the same path as any other terminal one.
pub struct LifecycleBridge {
    broadcaster: Arc<UpdateBroadcaster>,
}

impl LifecycleBridge {
    pub fn new(broadcaster: Arc<UpdateBroadcaster>) -> Self {
        Self { broadcaster }
    }

    fn publish_update(&self, record: &ExecutionRecord, hook: &'static str) {
        let snapshot = ExecutionSnapshot::from_record(record);
        tracing::info!(
            execution_id = snapshot.execution_id,
            job = %snapshot.job_name,
            status = %snapshot.status,
            hook,
            "Execution update published",
        );
        self.broadcaster.publish(snapshot);
    }
}

impl ExecutionListener for LifecycleBridge {
    fn before_run(&self, record: &ExecutionRecord) {
        self.publish_update(record, "before_run");
    }

    fn after_run(&self, record: &ExecutionRecord) {
        self.publish_update(record, "after_run");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
