use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use studio_core::error::error_response;

/// Reservation service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum BookingServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("class not found")]
    ClassNotFound,
    #[error("invalid date")]
    InvalidDate,
    #[error("date does not fall on the class weekday")]
    WrongWeekday,
    #[error("already booked")]
    AlreadyBooked,
    #[error("class full")]
    ClassFull,
    #[error("booking not found")]
    BookingNotFound,
    #[error("user not found")]
    UserNotFound,
    /// Catalog or identity unreachable, or answered with an unexpected shape.
    #[error("upstream service unavailable")]
    Upstream(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl BookingServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::ClassNotFound => "CLASS_NOT_FOUND",
            Self::InvalidDate => "INVALID_DATE",
            Self::WrongWeekday => "WRONG_WEEKDAY",
            Self::AlreadyBooked => "ALREADY_BOOKED",
            Self::ClassFull => "CLASS_FULL",
            Self::BookingNotFound => "BOOKING_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::Upstream(_) => "UPSTREAM_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidDate | Self::WrongWeekday => {
                StatusCode::BAD_REQUEST
            }
            Self::ClassNotFound | Self::BookingNotFound | Self::UserNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::AlreadyBooked | Self::ClassFull => StatusCode::CONFLICT,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn upstream(error: impl Into<anyhow::Error>, context: &'static str) -> Self {
        Self::Upstream(error.into().context(context))
    }
}

impl IntoResponse for BookingServiceError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
            }
            Self::Upstream(e) => {
                tracing::error!(error = %format!("{e:#}"), kind = "UPSTREAM_UNAVAILABLE", "upstream call failed");
            }
            _ => {}
        }
        error_response(self.status(), self.kind(), self.to_string())
    }
}
