use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use uuid::Uuid;

use studio_core::config::Config;
use studio_reservation::config::ReservationConfig;
use studio_reservation::router::build_router;
use studio_reservation::state::AppState;
use studio_testing::auth::{MockAuth, MockService, TEST_JWT_SECRET, TEST_SERVICE_SECRET};
use studio_testing::fixture::next_weekday;

/// Nothing listens on port 1, so every upstream call fails to connect.
const UNREACHABLE: &str = "http://127.0.0.1:1";

/// Router over a disconnected database and unreachable upstreams: only
/// paths that fail before any query are exercised here.
fn server() -> TestServer {
    let config = ReservationConfig::from_pairs(
        [
            ("DATABASE_URL", "postgres://unused"),
            ("JWT_SECRET", TEST_JWT_SECRET),
            ("SERVICE_JWT_SECRET", TEST_SERVICE_SECRET),
            ("CATALOG_URL", UNREACHABLE),
            ("IDENTITY_URL", UNREACHABLE),
            ("INTERNAL_AUTH_TOKEN", "internal"),
            ("UPSTREAM_TIMEOUT_SECS", "2"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned())),
    )
    .unwrap();
    let state = AppState::new(DatabaseConnection::Disconnected, &config).unwrap();
    TestServer::new(build_router(state)).unwrap()
}

fn booking_body() -> Value {
    json!({ "class_id": Uuid::now_v7(), "date": next_weekday(1) })
}

#[tokio::test]
async fn should_report_health() {
    let server = server();
    server.get("/health").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_require_auth_to_book() {
    let response = server().post("/booking/book").json(&booking_body()).await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_service_token_on_booking_route() {
    let (name, value) = MockService::new("catalog").header();
    let response = server()
        .post("/booking/book")
        .add_header(name, value)
        .json(&booking_body())
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_forbid_non_admin_statistics() {
    let (name, value) = MockAuth::user().header();
    let response = server()
        .get("/booking/admin/statistics")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_forbid_non_admin_booking_on_behalf() {
    let (name, value) = MockAuth::user().header();
    let response = server()
        .post("/booking/admin/bookings")
        .add_header(name, value)
        .json(&json!({
            "user_id": Uuid::now_v7(),
            "class_id": Uuid::now_v7(),
            "date": next_weekday(1),
        }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_reject_malformed_date() {
    let (name, value) = MockAuth::user().header();
    let response = server()
        .post("/booking/book")
        .add_header(name, value)
        .json(&json!({ "class_id": Uuid::now_v7(), "date": "2025-13-40" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_reject_malformed_date_filter() {
    let (name, value) = MockAuth::user().header();
    let response = server()
        .get("/booking/my-bookings?date_from=yesterday")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_reject_non_uuid_booking_id() {
    let (name, value) = MockAuth::user().header();
    let response = server()
        .delete("/booking/bookings/42")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_answer_bad_gateway_when_catalog_is_unreachable() {
    let (name, value) = MockAuth::user().header();
    let response = server()
        .post("/booking/book")
        .add_header(name, value)
        .json(&booking_body())
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["kind"], "UPSTREAM_UNAVAILABLE");
}

#[tokio::test]
async fn should_answer_bad_gateway_when_identity_is_unreachable() {
    let (name, value) = MockAuth::admin().header();
    let response = server()
        .post("/booking/admin/bookings")
        .add_header(name, value)
        .json(&json!({
            "user_id": Uuid::now_v7(),
            "class_id": Uuid::now_v7(),
            "date": next_weekday(1),
        }))
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);
}
