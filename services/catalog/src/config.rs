use serde::Deserialize;

use studio_auth_types::identity::TokenSecrets;
use studio_core::config::Config;

/// Catalog service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// Secret the identity service signs access tokens with.
    pub jwt_secret: String,
    #[serde(default)]
    pub service_jwt_secret: Option<String>,
    /// TCP port to listen on (default 3112). Env var: `CATALOG_PORT`.
    #[serde(default = "default_port")]
    pub catalog_port: u16,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

fn default_port() -> u16 {
    3112
}

fn default_true() -> bool {
    true
}

impl Config for CatalogConfig {}

impl CatalogConfig {
    pub fn token_secrets(&self) -> TokenSecrets {
        TokenSecrets {
            access: self.jwt_secret.clone(),
            service: self
                .service_jwt_secret
                .clone()
                .unwrap_or_else(|| self.jwt_secret.clone()),
        }
    }
}
