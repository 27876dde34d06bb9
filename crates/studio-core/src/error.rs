use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// JSON error envelope returned by every service: `{ "kind", "detail" }`.
///
/// `detail` is the human-readable message; `kind` is a stable machine code
/// callers can branch on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    pub detail: String,
}

/// Build an error response with the shared envelope.
pub fn error_response(status: StatusCode, kind: &str, detail: impl Into<String>) -> Response {
    let body = ErrorBody {
        kind: kind.to_owned(),
        detail: detail.into(),
    };
    (status, axum::Json(body)).into_response()
}
