//! Mock auth helpers for handler and router tests.
//!
//! Services validate bearer tokens locally, so tests mint real tokens signed
//! with [`TEST_JWT_SECRET`] / [`TEST_SERVICE_SECRET`] and configure the
//! service state with [`test_secrets`].

use axum::http::{HeaderMap, HeaderName, HeaderValue, header::AUTHORIZATION};
use uuid::Uuid;

use studio_auth_types::identity::TokenSecrets;
use studio_auth_types::token::{issue_access_token, issue_service_token};
use studio_domain::user::UserRole;

pub const TEST_JWT_SECRET: &str = "studio-test-access-secret";
pub const TEST_SERVICE_SECRET: &str = "studio-test-service-secret";

const TEST_TOKEN_TTL: u64 = 3600;

pub fn test_secrets() -> TokenSecrets {
    TokenSecrets {
        access: TEST_JWT_SECRET.to_owned(),
        service: TEST_SERVICE_SECRET.to_owned(),
    }
}

/// Configurable end-user identity for test requests.
#[derive(Debug, Clone, Copy)]
pub struct MockAuth {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn user() -> Self {
        Self::new(Uuid::now_v7(), UserRole::User)
    }

    pub fn admin() -> Self {
        Self::new(Uuid::now_v7(), UserRole::Admin)
    }

    pub fn token(&self) -> String {
        issue_access_token(self.user_id, self.role, TEST_JWT_SECRET, TEST_TOKEN_TTL)
            .expect("sign test access token")
            .token
    }

    /// `(Authorization, "Bearer <token>")`.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        bearer_header(&self.token())
    }

    pub fn headers(&self) -> HeaderMap {
        let (name, value) = self.header();
        let mut map = HeaderMap::new();
        map.insert(name, value);
        map
    }
}

/// Identity of a calling service for test requests.
#[derive(Debug, Clone)]
pub struct MockService {
    pub name: String,
}

impl MockService {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
        }
    }

    pub fn token(&self) -> String {
        issue_service_token(&self.name, TEST_SERVICE_SECRET, TEST_TOKEN_TTL)
            .expect("sign test service token")
            .token
    }

    pub fn header(&self) -> (HeaderName, HeaderValue) {
        bearer_header(&self.token())
    }
}

pub fn bearer_header(token: &str) -> (HeaderName, HeaderValue) {
    (
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).expect("token is a valid header value"),
    )
}
