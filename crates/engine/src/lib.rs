//! Batch execution engine.
//!
//! Jobs are registered as [`JobSpec`]s in a [`JobRegistry`]; the
//! [`BatchEngine`] admits launches against the in-memory execution store,
//! runs each workload on its own Tokio task, and notifies lifecycle
//! listeners around every run. The engine implements the
//! `jobdeck_core::ExecutionEngine` contract the tracking subsystem
//! consumes.

pub mod engine;
pub mod registry;
pub mod simulated;
pub mod store;

pub use engine::BatchEngine;
pub use registry::{JobRegistry, JobSpec, WorkContext, WorkOutcome, Workload};
pub use simulated::{simulated_registry, SimulatedWorkload, SIMULATED_JOB_NAMES};
pub use store::ExecutionStore;
