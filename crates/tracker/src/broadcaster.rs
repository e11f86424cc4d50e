//! Multicast update stream backed by a `tokio::sync::broadcast` channel.
//!
//! [`UpdateBroadcaster`] is the single fan-out point for
//! [`ExecutionSnapshot`] updates. It is designed to be shared via
//! `Arc<UpdateBroadcaster>` across every producer (launch path, lifecycle
//! bridge) and consumer (stream subscribers).

use std::sync::Mutex;

use tokio::sync::broadcast;

use crate::snapshot::ExecutionSnapshot;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// Replay-capable multicast stream of execution updates.
///
/// Every publish reaches every live subscriber in publish order, and a
/// subscriber attached later immediately receives the most recently
/// published snapshot before any live updates. Publishing never blocks
/// and never fails; a subscriber that cannot keep up skips the overwritten
/// updates and continues with the newest ones.
///
/// # Usage
///
/// ```rust
/// use jobdeck_core::{ExecutionRecord, ExecutionStatus, JobParams};
/// use jobdeck_tracker::broadcaster::UpdateBroadcaster;
/// use jobdeck_tracker::snapshot::ExecutionSnapshot;
///
/// let broadcaster = UpdateBroadcaster::default();
/// let mut subscription = broadcaster.subscribe();
///
/// let record = ExecutionRecord {
///     execution_id: 1,
///     instance_id: 1,
///     job_name: "nightly".to_string(),
///     status: ExecutionStatus::Starting,
///     create_time: chrono::Utc::now(),
///     start_time: None,
///     end_time: None,
///     exit_status: None,
///     params: JobParams::new(),
/// };
/// broadcaster.publish(ExecutionSnapshot::from_record(&record));
/// ```
pub struct UpdateBroadcaster {
    latest: Mutex<Option<ExecutionSnapshot>>,
    sender: broadcast::Sender<ExecutionSnapshot>,
}

impl UpdateBroadcaster {
    /// Create a broadcaster with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed updates are dropped
    /// and slow subscribers skip ahead to the newest ones.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            latest: Mutex::new(None),
            sender,
        }
    }

    /// Publish a snapshot to all current subscribers and remember it for
    /// future ones.
    ///
    /// If there are no active subscribers the update still becomes the
    /// replayed value for the next subscriber.
    pub fn publish(&self, snapshot: ExecutionSnapshot) {
        // The cell write and the send happen under one lock, so concurrent
        // publishers cannot leave the replayed value and the live stream
        // disagreeing about which update came last.
        let mut latest = self.latest.lock().unwrap();
        *latest = Some(snapshot.clone());
        // A send error only means there are zero receivers right now.
        let _ = self.sender.send(snapshot);
    }

    /// Attach a subscriber.
    ///
    /// The replayed value and the receiver are captured under the same
    /// lock, so the live stream continues exactly where the replay left
    /// off: no update is skipped and none is delivered twice.
    pub fn subscribe(&self) -> Subscription {
        let latest = self.latest.lock().unwrap();
        Subscription {
            replay: latest.clone(),
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for UpdateBroadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// One subscriber's view of the update stream.
pub struct Subscription {
    replay: Option<ExecutionSnapshot>,
    receiver: broadcast::Receiver<ExecutionSnapshot>,
}

impl Subscription {
    /// Receive the next update: the replayed snapshot first (when one was
    /// published before subscribing), then live updates in publish order.
    ///
    /// Returns `None` once the broadcaster has been dropped and all
    /// buffered updates have been consumed.
    pub async fn recv(&mut self) -> Option<ExecutionSnapshot> {
        if let Some(snapshot) = self.replay.take() {
            return Some(snapshot);
        }
        loop {
            match self.receiver.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Subscriber lagged; continuing with newest updates");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
