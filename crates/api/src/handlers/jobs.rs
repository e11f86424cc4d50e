//! Handlers for the `/jobs` resource.
//!
//! Launching replies at accept time with the initial execution snapshot;
//! completion is observed through the update stream or the query endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use futures::stream::Stream;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use jobdeck_core::{
    ExecutionId, PARAM_CUSTOM_JOB_NAME, PARAM_DURATION_SECS, PARAM_LAUNCH_TIME,
};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Duration handed to a launch when the request body does not name one.
const DEFAULT_LAUNCH_DURATION_SECS: i64 = 10;

/// Number of executions returned by the recent endpoint when `count` is
/// not given.
const DEFAULT_RECENT_COUNT: usize = 10;

// ---------------------------------------------------------------------------
// Launch
// ---------------------------------------------------------------------------

/// Optional launch request body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LaunchRequest {
    /// Run label; defaults to `{job_name}_run_{millis}`.
    pub custom_job_name: Option<String>,
    /// Simulated work duration in seconds; defaults to 10.
    pub duration_in_seconds: Option<i64>,
}

/// POST /api/jobs/launch/{job_name}
///
/// Launch a job. The body is optional; missing fields fall back to a
/// generated run label and the default duration. `launchTime` is stamped
/// on every request so repeated launches of the same job get distinct
/// parameter identities. Returns 202 with the accepted execution snapshot.
pub async fn launch_job(
    State(state): State<AppState>,
    Path(job_name): Path<String>,
    body: Option<Json<LaunchRequest>>,
) -> AppResult<impl IntoResponse> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let custom_job_name = request.custom_job_name.unwrap_or_else(|| {
        format!("{job_name}_run_{}", Utc::now().timestamp_millis())
    });
    let duration_in_seconds = request
        .duration_in_seconds
        .unwrap_or(DEFAULT_LAUNCH_DURATION_SECS);

    let mut raw_params = Map::new();
    raw_params.insert(
        PARAM_CUSTOM_JOB_NAME.to_string(),
        Value::String(custom_job_name),
    );
    raw_params.insert(PARAM_DURATION_SECS.to_string(), json!(duration_in_seconds));
    raw_params.insert(
        PARAM_LAUNCH_TIME.to_string(),
        json!(Utc::now().timestamp_millis()),
    );

    let snapshot = state.service.launch(&job_name, &raw_params).await?;

    Ok((StatusCode::ACCEPTED, Json(DataResponse { data: snapshot })))
}

// ---------------------------------------------------------------------------
// Update stream
// ---------------------------------------------------------------------------

/// GET /api/jobs/stream
///
/// Stream execution updates as Server-Sent Events. The latest update (if
/// any) is replayed immediately on connect, then live updates follow until
/// the client disconnects.
pub async fn stream_updates(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let subscription = state.service.subscribe();

    let stream = futures::stream::unfold(subscription, |mut subscription| async move {
        let update = subscription.recv().await?;
        Some((Event::default().json_data(&update), subscription))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Query parameters for the recent-executions endpoint.
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    #[serde(default = "default_recent_count")]
    pub count: usize,
}

fn default_recent_count() -> usize {
    DEFAULT_RECENT_COUNT
}

/// GET /api/jobs/{job_name}/recent?count=N
///
/// The most recently created executions of `job_name`, newest first,
/// at most `count` of them (default 10).
pub async fn recent_executions(
    State(state): State<AppState>,
    Path(job_name): Path<String>,
    Query(query): Query<RecentQuery>,
) -> AppResult<impl IntoResponse> {
    let executions = state
        .service
        .recent_executions(&job_name, query.count)
        .await?;

    Ok(Json(DataResponse { data: executions }))
}

/// GET /api/jobs/{job_name}/running
///
/// Executions of `job_name` that have not reached a terminal status.
pub async fn running_executions(
    State(state): State<AppState>,
    Path(job_name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let executions = state.service.running_executions(&job_name).await?;

    Ok(Json(DataResponse { data: executions }))
}

/// GET /api/jobs/execution/{id}
///
/// A single execution snapshot by id, or 404 if no such execution exists.
pub async fn execution_by_id(
    State(state): State<AppState>,
    Path(execution_id): Path<ExecutionId>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state
        .service
        .execution_by_id(execution_id)
        .await?
        .ok_or(AppError::ExecutionNotFound(execution_id))?;

    Ok(Json(DataResponse { data: snapshot }))
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// GET /api/jobs/dashboard-snapshot
///
/// Running executions across the configured dashboard jobs, deduplicated
/// by execution id. Jobs whose query fails are skipped, so the endpoint
/// always answers 200 with whatever could be collected.
pub async fn dashboard_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.dashboard.snapshot().await;

    Json(DataResponse { data: snapshot })
}
