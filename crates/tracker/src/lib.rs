//! Execution tracking and update distribution.
//!
//! This crate sits between the batch engine and its observers:
//!
//! - [`snapshot::ExecutionSnapshot`] -- the stable view of one execution.
//! - [`broadcaster::UpdateBroadcaster`] -- replay-capable multicast stream
//!   of snapshot updates.
//! - [`bridge::LifecycleBridge`] -- engine lifecycle hooks feeding the
//!   broadcaster.
//! - [`service::JobService`] -- launch plus point queries.
//! - [`dashboard::DashboardAggregator`] -- the deduplicated, consistently
//!   ordered view behind the dashboard.

pub mod bridge;
pub mod broadcaster;
pub mod dashboard;
pub mod service;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod test_support;

pub use bridge::LifecycleBridge;
pub use broadcaster::{Subscription, UpdateBroadcaster};
pub use dashboard::DashboardAggregator;
pub use service::JobService;
pub use snapshot::ExecutionSnapshot;
