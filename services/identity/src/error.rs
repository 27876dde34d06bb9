use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use studio_core::error::error_response;

/// Identity service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum IdentityServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("nothing to update")]
    MissingData,
    #[error("incorrect email or password")]
    InvalidCredentials,
    #[error("account is disabled")]
    AccountDisabled,
    #[error("current password is incorrect")]
    WrongPassword,
    #[error("email already registered")]
    EmailTaken,
    #[error("user not found")]
    UserNotFound,
    #[error("admins cannot remove their own admin role or deactivate themselves")]
    SelfDemotion,
    #[error("cannot remove the last active admin")]
    LastAdmin,
    #[error("invalid internal credential")]
    InvalidInternalCredential,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IdentityServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountDisabled => "ACCOUNT_DISABLED",
            Self::WrongPassword => "WRONG_PASSWORD",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::SelfDemotion => "SELF_DEMOTION",
            Self::LastAdmin => "LAST_ADMIN",
            Self::InvalidInternalCredential => "INVALID_INTERNAL_CREDENTIAL",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MissingData | Self::WrongPassword | Self::SelfDemotion => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCredentials | Self::InvalidInternalCredential => StatusCode::UNAUTHORIZED,
            Self::AccountDisabled => StatusCode::FORBIDDEN,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::EmailTaken | Self::LastAdmin => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for IdentityServiceError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        error_response(self.status(), self.kind(), self.to_string())
    }
}
