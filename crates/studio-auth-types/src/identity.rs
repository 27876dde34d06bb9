//! Bearer-token extractors.
//!
//! Handlers take [`CurrentUser`], [`AdminUser`] or [`ServiceCaller`] as
//! arguments; the router state must provide [`TokenSecrets`] via `FromRef`.

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use http::request::Parts;
use http::{HeaderMap, HeaderValue, StatusCode};
use uuid::Uuid;

use studio_core::error::error_response;
use studio_domain::user::UserRole;

use crate::token::{AuthError, validate_access_token, validate_service_token};

/// HMAC secrets for the two token kinds.
#[derive(Debug, Clone)]
pub struct TokenSecrets {
    pub access: String,
    pub service: String,
}

/// Authenticated end user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Authenticated end user holding the admin role. 403 otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminUser(pub CurrentUser);

/// Another Studio service calling with a service token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCaller {
    pub service: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthRejection {
    #[error("not authenticated")]
    MissingToken,
    #[error("could not validate credentials")]
    InvalidToken(#[source] AuthError),
    #[error("admin privileges required")]
    NotAdmin,
}

impl AuthRejection {
    pub fn kind(&self) -> &'static str {
        if self.status() == StatusCode::UNAUTHORIZED {
            "UNAUTHORIZED"
        } else {
            "FORBIDDEN"
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingToken => StatusCode::UNAUTHORIZED,
            Self::InvalidToken(AuthError::WrongKind) => StatusCode::FORBIDDEN,
            Self::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Self::NotAdmin => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::InvalidToken(ref e) = self {
            tracing::debug!(error = %e, "bearer token rejected");
        }
        let mut resp = error_response(status, self.kind(), self.to_string());
        if status == StatusCode::UNAUTHORIZED {
            resp.headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        resp
    }
}

/// Extract the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn authenticate_user(
    headers: &HeaderMap,
    secrets: &TokenSecrets,
) -> Result<CurrentUser, AuthRejection> {
    let token = bearer_token(headers).ok_or(AuthRejection::MissingToken)?;
    let info = validate_access_token(token, &secrets.access).map_err(|e| match e {
        AuthError::InvalidSignature if validate_service_token(token, &secrets.service).is_ok() => {
            AuthRejection::InvalidToken(AuthError::WrongKind)
        }
        other => AuthRejection::InvalidToken(other),
    })?;
    Ok(CurrentUser {
        user_id: info.user_id,
        role: info.role,
    })
}

fn authenticate_service(
    headers: &HeaderMap,
    secrets: &TokenSecrets,
) -> Result<ServiceCaller, AuthRejection> {
    let token = bearer_token(headers).ok_or(AuthRejection::MissingToken)?;
    // With separate secrets a user token fails the signature check rather
    // than the kind check; report both as the wrong kind of token.
    let info = validate_service_token(token, &secrets.service).map_err(|e| match e {
        AuthError::InvalidSignature if validate_access_token(token, &secrets.access).is_ok() => {
            AuthRejection::InvalidToken(AuthError::WrongKind)
        }
        other => AuthRejection::InvalidToken(other),
    })?;
    Ok(ServiceCaller {
        service: info.service,
    })
}

// axum-core 0.5 defines `from_request_parts` as `fn -> impl Future + Send`.
// Validation is synchronous, so resolve it up front and hand back a 'static
// future that owns the result.

impl<S> FromRequestParts<S> for CurrentUser
where
    TokenSecrets: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = authenticate_user(&parts.headers, &TokenSecrets::from_ref(state));
        async move { result }
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    TokenSecrets: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = authenticate_user(&parts.headers, &TokenSecrets::from_ref(state)).and_then(
            |user| {
                if user.is_admin() {
                    Ok(AdminUser(user))
                } else {
                    Err(AuthRejection::NotAdmin)
                }
            },
        );
        async move { result }
    }
}

impl<S> FromRequestParts<S> for ServiceCaller
where
    TokenSecrets: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = authenticate_service(&parts.headers, &TokenSecrets::from_ref(state));
        async move { result }
    }
}
