//! Request extractors that reject with the shared JSON error envelope.
//!
//! The stock axum extractors answer malformed input with a plain-text body
//! (and 422 for JSON data errors); these wrappers keep every rejection a
//! `400 VALIDATION` with a `detail` message.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::error_response;

#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(BadRequest))]
pub struct JsonBody<T>(pub T);

#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(BadRequest))]
pub struct QueryParams<T>(pub T);

#[derive(Debug, Clone, Copy, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(BadRequest))]
pub struct PathParam<T>(pub T);

#[derive(Debug)]
pub struct BadRequest {
    pub detail: String,
}

impl From<JsonRejection> for BadRequest {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            detail: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for BadRequest {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            detail: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for BadRequest {
    fn from(rejection: PathRejection) -> Self {
        Self {
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for BadRequest {
    fn into_response(self) -> Response {
        error_response(StatusCode::BAD_REQUEST, "VALIDATION", self.detail)
    }
}
