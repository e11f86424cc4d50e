use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jobdeck_core::{ExecutionId, LaunchError, QueryError};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain errors from `jobdeck_core` and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A launch was rejected by the execution engine.
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// The execution store could not serve a query.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// A lookup for an execution id that does not exist.
    #[error("Execution with id {0} not found")]
    ExecutionNotFound(ExecutionId),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- Launch rejections ---
            // Each rejection keeps its own code so clients can distinguish
            // a missing job from a duplicate or an unrestartable one.
            AppError::Launch(launch) => match launch {
                LaunchError::JobNotFound(_) => {
                    (StatusCode::NOT_FOUND, "JOB_NOT_FOUND", launch.to_string())
                }
                LaunchError::AlreadyRunning(_) => {
                    (StatusCode::CONFLICT, "ALREADY_RUNNING", launch.to_string())
                }
                LaunchError::AlreadyComplete(_) => {
                    (StatusCode::CONFLICT, "ALREADY_COMPLETE", launch.to_string())
                }
                LaunchError::RestartNotAllowed(_) => (
                    StatusCode::CONFLICT,
                    "RESTART_NOT_ALLOWED",
                    launch.to_string(),
                ),
                LaunchError::InvalidParameters { .. } => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_PARAMETERS",
                    launch.to_string(),
                ),
            },

            // --- Store failures ---
            AppError::Query(query) => {
                tracing::error!(error = %query, "Execution store query failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "QUERY_FAILED",
                    "Execution store query failed".to_string(),
                )
            }

            // --- Lookups for absent executions ---
            AppError::ExecutionNotFound(_) => {
                (StatusCode::NOT_FOUND, "EXECUTION_NOT_FOUND", self.to_string())
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
