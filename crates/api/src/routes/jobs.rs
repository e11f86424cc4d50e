//! Route definitions for the `/jobs` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Routes mounted at `/jobs`.
///
/// ```text
/// POST   /launch/{job_name}      -> launch_job
/// GET    /stream                 -> stream_updates
/// GET    /{job_name}/recent      -> recent_executions
/// GET    /{job_name}/running     -> running_executions
/// GET    /execution/{id}         -> execution_by_id
/// GET    /dashboard-snapshot     -> dashboard_snapshot
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/launch/{job_name}", post(jobs::launch_job))
        .route("/stream", get(jobs::stream_updates))
        .route("/{job_name}/recent", get(jobs::recent_executions))
        .route("/{job_name}/running", get(jobs::running_executions))
        .route("/execution/{id}", get(jobs::execution_by_id))
        .route("/dashboard-snapshot", get(jobs::dashboard_snapshot))
}
