//! JWT access-token and service-token validation.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use studio_domain::user::UserRole;

/// Prefix of the `sub` claim on service tokens: `service:<name>`.
pub const SERVICE_SUBJECT_PREFIX: &str = "service:";

/// User identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub role: UserRole,
    pub exp: u64,
}

/// Calling service extracted from a validated service token.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub service: String,
    pub exp: u64,
}

/// Errors returned by token validation and issuance.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("token kind not accepted here")]
    WrongKind,
    #[error("failed to encode token")]
    Encode,
}

/// Which audience a token was minted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Service,
}

/// JWT claims payload shared by token creation (identity service) and validation.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `sub` | user id (UUID) for access tokens, `service:<name>` for service tokens |
/// | `kind` | [`TokenKind`] |
/// | `role` | user role, access tokens only |
/// | `svc` | calling service name, service tokens only |
/// | `iat` / `exp` | seconds since epoch |
///
/// [`Serialize`] requires the **`USE_ONLY_IN_IDENTITY_SERVICE`** cargo feature:
/// only the identity service issues tokens.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "USE_ONLY_IN_IDENTITY_SERVICE", test), derive(Serialize))]
pub struct JwtClaims {
    pub sub: String,
    pub kind: TokenKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svc: Option<String>,
    pub iat: u64,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

// ── Core decode (private) ────────────────────────────────────────────────

/// Validation: HS256, exp checked, required claims `exp` + `sub`, 60s leeway.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

// ── Public: all consumers ────────────────────────────────────────────────

/// Validate a user access token, returning the caller's identity.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    if claims.kind != TokenKind::Access {
        return Err(AuthError::WrongKind);
    }
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    let role = claims.role.ok_or(AuthError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        role,
        exp: claims.exp,
    })
}

/// Validate a service-to-service token, returning the calling service name.
pub fn validate_service_token(token: &str, secret: &str) -> Result<ServiceInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    if claims.kind != TokenKind::Service {
        return Err(AuthError::WrongKind);
    }
    let service = claims
        .sub
        .strip_prefix(SERVICE_SUBJECT_PREFIX)
        .filter(|name| !name.is_empty())
        .ok_or(AuthError::Malformed)?;
    Ok(ServiceInfo {
        service: service.to_owned(),
        exp: claims.exp,
    })
}

// ── Feature-gated: identity service only ─────────────────────────────────

/// A freshly signed token and its lifetime.
#[cfg(any(feature = "USE_ONLY_IN_IDENTITY_SERVICE", test))]
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: u64,
    pub exp: u64,
}

#[cfg(any(feature = "USE_ONLY_IN_IDENTITY_SERVICE", test))]
fn sign(claims: &JwtClaims, secret: &str) -> Result<String, AuthError> {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::Encode)
}

/// Sign an access token for `user_id` valid for `ttl_secs`.
#[cfg(any(feature = "USE_ONLY_IN_IDENTITY_SERVICE", test))]
pub fn issue_access_token(
    user_id: Uuid,
    role: UserRole,
    secret: &str,
    ttl_secs: u64,
) -> Result<IssuedToken, AuthError> {
    let iat = now_secs();
    let claims = JwtClaims {
        sub: user_id.to_string(),
        kind: TokenKind::Access,
        role: Some(role),
        svc: None,
        iat,
        exp: iat + ttl_secs,
    };
    Ok(IssuedToken {
        token: sign(&claims, secret)?,
        expires_in: ttl_secs,
        exp: claims.exp,
    })
}

/// Sign a service token for the named calling service valid for `ttl_secs`.
#[cfg(any(feature = "USE_ONLY_IN_IDENTITY_SERVICE", test))]
pub fn issue_service_token(
    service: &str,
    secret: &str,
    ttl_secs: u64,
) -> Result<IssuedToken, AuthError> {
    let iat = now_secs();
    let claims = JwtClaims {
        sub: format!("{SERVICE_SUBJECT_PREFIX}{service}"),
        kind: TokenKind::Service,
        role: None,
        svc: Some(service.to_owned()),
        iat,
        exp: iat + ttl_secs,
    };
    Ok(IssuedToken {
        token: sign(&claims, secret)?,
        expires_in: ttl_secs,
        exp: claims.exp,
    })
}
