//! Shared types and contracts for the jobdeck workspace.
//!
//! This crate carries everything both sides of the engine boundary agree
//! on:
//!
//! - [`JobParams`] / [`ParamValue`] -- the scalar parameter model accepted
//!   at launch time.
//! - [`ExecutionStatus`] / [`ExitStatus`] -- the closed lifecycle set.
//! - [`ExecutionRecord`] -- the engine's record of one run attempt.
//! - [`ExecutionEngine`] / [`ExecutionListener`] -- the collaborator
//!   contract between the engine and the tracking subsystem.
//! - [`LaunchError`] / [`QueryError`] -- the failure taxonomy.

pub mod engine;
pub mod params;
pub mod record;
pub mod status;
pub mod types;

pub use engine::{ExecutionEngine, ExecutionListener, LaunchError, QueryError};
pub use params::{
    JobParams, ParamValue, PARAM_CUSTOM_JOB_NAME, PARAM_DURATION_SECS, PARAM_LAUNCH_TIME,
};
pub use record::ExecutionRecord;
pub use status::{ExecutionStatus, ExitStatus};
pub use types::{ExecutionId, InstanceId, Timestamp};
