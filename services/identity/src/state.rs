use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use studio_auth_types::identity::TokenSecrets;

use crate::config::IdentityConfig;
use crate::infra::db::DbUserRepository;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub secrets: TokenSecrets,
    pub access_ttl_secs: u64,
    pub service_ttl_secs: u64,
    pub internal_auth_token: Option<String>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &IdentityConfig) -> Self {
        Self {
            db,
            secrets: config.token_secrets(),
            access_ttl_secs: config.access_token_ttl_secs,
            service_ttl_secs: config.service_token_ttl_secs,
            internal_auth_token: config.internal_auth_token.clone(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for TokenSecrets {
    fn from_ref(state: &AppState) -> Self {
        state.secrets.clone()
    }
}
