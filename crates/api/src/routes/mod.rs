pub mod health;
pub mod jobs;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /jobs/launch/{job_name}     launch a job (POST)
/// /jobs/stream                live execution updates (SSE)
/// /jobs/{job_name}/recent     recent executions (GET, ?count=N)
/// /jobs/{job_name}/running    running executions (GET)
/// /jobs/execution/{id}        execution by id (GET)
/// /jobs/dashboard-snapshot    running executions across the dashboard jobs (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/jobs", jobs::router())
}
