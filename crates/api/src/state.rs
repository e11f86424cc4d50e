use std::sync::Arc;

use jobdeck_engine::BatchEngine;
use jobdeck_tracker::{DashboardAggregator, JobService};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The batch execution engine (job registry + execution store).
    pub engine: Arc<BatchEngine>,
    /// Launch and query front end over the engine.
    pub service: Arc<JobService<BatchEngine>>,
    /// Aggregated running-execution view for the configured job set.
    pub dashboard: Arc<DashboardAggregator<BatchEngine>>,
}
