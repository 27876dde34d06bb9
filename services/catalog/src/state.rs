use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use studio_auth_types::identity::TokenSecrets;

use crate::infra::db::DbClassRepository;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub secrets: TokenSecrets,
}

impl AppState {
    pub fn class_repo(&self) -> DbClassRepository {
        DbClassRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for TokenSecrets {
    fn from_ref(state: &AppState) -> Self {
        state.secrets.clone()
    }
}
