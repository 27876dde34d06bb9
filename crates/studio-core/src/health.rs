use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

/// Handler for `GET /health`: liveness only, no dependency checks.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handler for `GET /healthz`.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz`.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
