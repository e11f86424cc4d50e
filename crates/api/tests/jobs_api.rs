//! Integration tests for the `/api/jobs` endpoints.
//!
//! Each test wires a fresh engine with the simulated job set, so launches
//! in one test never leak into another.

mod common;

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use common::{body_json, get};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

/// Send a POST request with a JSON body.
async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request with no body.
async fn post_empty(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Launch `job_name` with an explicit run label and duration, returning
/// the accepted execution id.
async fn launch(app: &Router, job_name: &str, run_label: &str, duration_secs: i64) -> i64 {
    let response = post_json(
        app.clone(),
        &format!("/api/jobs/launch/{job_name}"),
        json!({ "customJobName": run_label, "durationInSeconds": duration_secs }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let json = body_json(response).await;
    json["data"]["executionId"]
        .as_i64()
        .expect("launch response must carry an executionId")
}

// ---------------------------------------------------------------------------
// Test: POST /launch with no body uses the documented defaults
// ---------------------------------------------------------------------------

#[tokio::test]
async fn launch_with_defaults_returns_202_with_snapshot() {
    let app = common::build_test_app();
    let response = post_empty(app, "/api/jobs/launch/simulatedJob").await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let json = body_json(response).await;
    let data = &json["data"];

    assert_eq!(data["jobName"], "simulatedJob");
    assert_eq!(data["status"], "STARTING");
    assert!(data["executionId"].is_i64());

    // Defaults: duration 10, generated run label, stamped launch time.
    assert_eq!(data["parameters"]["durationInSeconds"], 10);
    let label = data["parameters"]["customJobName"].as_str().unwrap();
    assert!(
        label.starts_with("simulatedJob_run_"),
        "expected a generated run label, got: {label}"
    );
    assert!(data["parameters"]["launchTime"].is_i64());
}

// ---------------------------------------------------------------------------
// Test: POST /launch body fields override the defaults
// ---------------------------------------------------------------------------

#[tokio::test]
async fn launch_body_overrides_defaults() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/jobs/launch/simulatedJob",
        json!({ "customJobName": "api_override_run", "durationInSeconds": 1 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["parameters"]["customJobName"], "api_override_run");
    assert_eq!(json["data"]["parameters"]["durationInSeconds"], 1);
}

// ---------------------------------------------------------------------------
// Test: POST /launch for an unregistered job returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn launch_unknown_job_returns_404_with_code() {
    let app = common::build_test_app();
    let response = post_empty(app, "/api/jobs/launch/noSuchJob").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "JOB_NOT_FOUND");
    assert!(json["error"].as_str().unwrap().contains("noSuchJob"));
}

// ---------------------------------------------------------------------------
// Test: launch -> GET /execution/{id} round trip
// ---------------------------------------------------------------------------

#[tokio::test]
async fn execution_lookup_roundtrip() {
    let app = common::build_test_app();
    let id = launch(&app, "simulatedJob", "roundtrip_run", 30).await;

    let response = get(app.clone(), &format!("/api/jobs/execution/{id}")).await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["executionId"], id);
    assert_eq!(json["data"]["jobName"], "simulatedJob");
    assert_eq!(json["data"]["parameters"]["customJobName"], "roundtrip_run");
}

// ---------------------------------------------------------------------------
// Test: GET /execution/{id} for an unknown id returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_execution_returns_404_with_code() {
    let app = common::build_test_app();
    let response = get(app, "/api/jobs/execution/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "EXECUTION_NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: GET /recent bounds the result and orders newest first
// ---------------------------------------------------------------------------

#[tokio::test]
async fn recent_bounds_and_orders_executions() {
    let app = common::build_test_app();
    let first = launch(&app, "simulatedJob2", "recent_run_1", 30).await;
    let second = launch(&app, "simulatedJob2", "recent_run_2", 30).await;
    let third = launch(&app, "simulatedJob2", "recent_run_3", 30).await;

    let response = get(app.clone(), "/api/jobs/simulatedJob2/recent?count=2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();

    // The newest two of the three launches, newest first; the oldest is
    // truncated away.
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["executionId"], third);
    assert_eq!(data[1]["executionId"], second);
    assert!(data.iter().all(|s| s["executionId"] != first));

    // Without an explicit count the default (10) covers all three.
    let response = get(app.clone(), "/api/jobs/simulatedJob2/recent").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// Test: GET /running lists the live execution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn running_lists_live_executions() {
    let app = common::build_test_app();
    let live = launch(&app, "simulatedJob3", "running_probe", 30).await;

    let response = get(app.clone(), "/api/jobs/simulatedJob3/running").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();

    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["executionId"], live);
    assert_ne!(data[0]["status"], "COMPLETED");
}

// ---------------------------------------------------------------------------
// Test: finished executions leave the running list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn finished_executions_leave_the_running_list() {
    let app = common::build_test_app();
    launch(&app, "simulatedJob3", "finishing_run", 1).await;

    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        let response = get(app.clone(), "/api/jobs/simulatedJob3/running").await;
        let json = body_json(response).await;
        if json["data"].as_array().unwrap().is_empty() {
            break;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "execution still listed as running after 2s"
        );
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

// ---------------------------------------------------------------------------
// Test: a failing job reaches FAILED with an end time
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failing_job_reaches_failed_status() {
    let app = common::build_test_app();
    let id = launch(&app, "simulatedJob4", "failing_run", 0).await;

    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        let response = get(app.clone(), &format!("/api/jobs/execution/{id}")).await;
        let json = body_json(response).await;
        if json["data"]["status"] == "FAILED" {
            assert_eq!(json["data"]["exitCode"], "FAILED");
            assert!(json["data"]["endTime"].is_string());
            break;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "execution did not fail within 2s"
        );
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

// ---------------------------------------------------------------------------
// Test: dashboard snapshot is scoped to the configured jobs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dashboard_snapshot_scopes_to_configured_jobs() {
    let app = common::build_test_app();
    let a = launch(&app, "simulatedJob", "dash_a", 30).await;
    let b = launch(&app, "simulatedJob2", "dash_b", 30).await;
    // simulatedJob5 is registered but not part of the dashboard job set.
    let off_list = launch(&app, "simulatedJob5", "dash_off", 30).await;

    let response = get(app.clone(), "/api/jobs/dashboard-snapshot").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["executionId"].as_i64().unwrap())
        .collect();

    assert!(ids.contains(&a));
    assert!(ids.contains(&b));
    assert!(!ids.contains(&off_list));
    assert_eq!(ids.len(), 2);
}

// ---------------------------------------------------------------------------
// Test: GET /stream replays the latest update on connect
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stream_replays_the_latest_update_on_connect() {
    let app = common::build_test_app();
    let id = launch(&app, "simulatedJob", "stream_probe", 30).await;

    let response = get(app.clone(), "/api/jobs/stream").await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .expect("Missing Content-Type header")
        .to_str()
        .unwrap();
    assert!(
        content_type.starts_with("text/event-stream"),
        "unexpected content type: {content_type}"
    );

    // The subscriber connected after the launch, so the first frame is the
    // replay of that run's latest update.
    let mut body = response.into_body();
    let frame = tokio::time::timeout(Duration::from_secs(2), body.frame())
        .await
        .expect("no SSE frame within 2s")
        .expect("stream ended before the first frame")
        .expect("stream frame error");

    let bytes = frame.into_data().expect("expected a data frame");
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("executionId"), "unexpected frame: {text}");
    assert!(text.contains(&format!("\"executionId\":{id}")));
}
