use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use studio_identity::router::build_router;
use studio_identity::state::AppState;
use studio_testing::auth::{MockAuth, MockService, bearer_header, test_secrets};

const INTERNAL_TOKEN: &str = "internal-shared-token";

/// Router over a disconnected database: only paths that fail before any
/// query are exercised here.
fn server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        secrets: test_secrets(),
        access_ttl_secs: 1800,
        service_ttl_secs: 300,
        internal_auth_token: Some(INTERNAL_TOKEN.to_owned()),
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_report_health() {
    let response = server().get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn should_echo_request_id() {
    let response = server()
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-123"),
        )
        .await;
    assert_eq!(response.header("x-request-id"), "req-123");
}

#[tokio::test]
async fn should_require_token_for_me() {
    let response = server().get("/auth/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "UNAUTHORIZED");
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn should_forbid_admin_routes_for_users() {
    let (name, value) = MockAuth::user().header();
    let response = server()
        .get("/auth/admin/users")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_reject_access_token_on_internal_route() {
    let (name, value) = MockAuth::admin().header();
    let response = server()
        .get(&format!("/auth/internal/users/{}", uuid::Uuid::now_v7()))
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_reject_service_token_on_user_route() {
    let (name, value) = MockService::new("reservation").header();
    let response = server().get("/auth/me").add_header(name, value).await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_reject_malformed_json_as_validation() {
    let response = server()
        .post("/auth/register")
        .content_type("application/json")
        .text("{not json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_reject_weak_password_on_register() {
    let response = server()
        .post("/auth/register")
        .json(&json!({ "email": "a@example.com", "name": "A", "password": "short" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_reject_empty_role_change() {
    let (name, value) = MockAuth::admin().header();
    let response = server()
        .put(&format!("/auth/admin/users/{}/role", uuid::Uuid::now_v7()))
        .add_header(name, value)
        .json(&json!({}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "MISSING_DATA");
}

#[tokio::test]
async fn should_reject_non_uuid_path() {
    let (name, value) = MockService::new("reservation").header();
    let response = server()
        .get("/auth/internal/users/not-a-uuid")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_issue_service_token_for_internal_credential() {
    let (name, value) = bearer_header(INTERNAL_TOKEN);
    let response = server()
        .post("/auth/internal/service-token")
        .add_header(name, value)
        .json(&json!({ "service_name": "reservation" }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["expires_in"], 300);

    let token = body["access_token"].as_str().unwrap();
    let info =
        studio_auth_types::token::validate_service_token(token, &test_secrets().service).unwrap();
    assert_eq!(info.service, "reservation");
}

#[tokio::test]
async fn should_reject_wrong_internal_credential() {
    let (name, value) = bearer_header("nope");
    let response = server()
        .post("/auth/internal/service-token")
        .add_header(name, value)
        .json(&json!({ "service_name": "reservation" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>()["kind"],
        "INVALID_INTERNAL_CREDENTIAL"
    );
}
