use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use studio_catalog::router::build_router;
use studio_catalog::state::AppState;
use studio_testing::auth::{MockAuth, MockService, test_secrets};

/// Router over a disconnected database: only paths that fail before any
/// query are exercised here.
fn server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        secrets: test_secrets(),
    };
    TestServer::new(build_router(state)).unwrap()
}

fn class_body(capacity: u32) -> Value {
    json!({
        "name": "Yoga",
        "teacher": "Anna",
        "weekday": 1,
        "start_time": "18:00:00",
        "capacity": capacity,
    })
}

#[tokio::test]
async fn should_report_health() {
    server().get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn should_reject_weekday_out_of_range() {
    let response = server().get("/schedule/schedule?weekday=8").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_reject_non_numeric_weekday() {
    let response = server().get("/schedule/schedule?weekday=monday").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_require_auth_to_create() {
    let response = server().post("/schedule/schedule").json(&class_body(10)).await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_forbid_non_admin_create() {
    let (name, value) = MockAuth::user().header();
    let response = server()
        .post("/schedule/schedule")
        .add_header(name, value)
        .json(&class_body(10))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_validate_capacity_before_store() {
    let (name, value) = MockAuth::admin().header();
    let response = server()
        .post("/schedule/schedule")
        .add_header(name, value)
        .json(&class_body(101))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["detail"], "capacity must be 1-100");
}

#[tokio::test]
async fn should_reject_empty_update() {
    let (name, value) = MockAuth::admin().header();
    let response = server()
        .put(&format!("/schedule/schedule/{}", uuid::Uuid::now_v7()))
        .add_header(name, value)
        .json(&json!({}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "MISSING_DATA");
}

#[tokio::test]
async fn should_forbid_statistics_for_users() {
    let (name, value) = MockAuth::user().header();
    let response = server()
        .get("/schedule/schedule/statistics")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_keep_internal_routes_for_services() {
    let (name, value) = MockAuth::admin().header();
    let response = server()
        .get("/schedule/schedule/ids?teacher=anna")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server()
        .post("/schedule/internal/classes/lookup")
        .json(&json!({ "ids": [] }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_answer_empty_lookup_without_store() {
    let (name, value) = MockService::new("reservation").header();
    let response = server()
        .post("/schedule/internal/classes/lookup")
        .add_header(name, value)
        .json(&json!({ "ids": [] }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["items"], json!([]));
}
