use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use jobdeck_api::config::ServerConfig;
use jobdeck_api::router::build_app_router;
use jobdeck_api::state::AppState;
use jobdeck_engine::{simulated_registry, BatchEngine};
use jobdeck_tracker::{DashboardAggregator, JobService, LifecycleBridge, UpdateBroadcaster};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout, and the default dashboard job set.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        dashboard_jobs: vec![
            "simulatedJob".to_string(),
            "simulatedJob2".to_string(),
            "simulatedJob3".to_string(),
            "simulatedJob4".to_string(),
        ],
    }
}

/// Build the full application router wired to a fresh engine with the
/// simulated job set.
///
/// This mirrors the construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app() -> Router {
    let config = test_config();

    let broadcaster = Arc::new(UpdateBroadcaster::default());

    let mut engine = BatchEngine::new(simulated_registry());
    engine.add_listener(Arc::new(LifecycleBridge::new(Arc::clone(&broadcaster))));
    let engine = Arc::new(engine);

    let service = Arc::new(JobService::new(Arc::clone(&engine), broadcaster));
    let dashboard = Arc::new(DashboardAggregator::new(
        Arc::clone(&engine),
        config.dashboard_jobs.clone(),
    ));

    let state = AppState {
        config: Arc::new(config.clone()),
        engine,
        service,
        dashboard,
    };

    build_app_router(state, &config)
}

/// Send a GET request to the app and return the raw response.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
