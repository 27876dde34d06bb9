use serde::Deserialize;

use studio_auth_types::identity::TokenSecrets;
use studio_core::config::Config;

/// Reservation service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct ReservationConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    pub jwt_secret: String,
    #[serde(default)]
    pub service_jwt_secret: Option<String>,
    /// Base URL of the catalog service, e.g. `http://catalog:3112`.
    pub catalog_url: String,
    /// Base URL of the identity service, e.g. `http://identity:3111`.
    pub identity_url: String,
    /// Credential exchanged with identity for short-lived service tokens.
    pub internal_auth_token: String,
    /// Name this service presents in its service tokens.
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// TCP port to listen on (default 3113). Env var: `RESERVATION_PORT`.
    #[serde(default = "default_port")]
    pub reservation_port: u16,
    /// Timeout for calls to catalog and identity.
    #[serde(default = "default_upstream_timeout")]
    pub upstream_timeout_secs: u64,
    /// Reject dates whose weekday differs from the class weekday.
    #[serde(default = "default_true")]
    pub enforce_weekday: bool,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

fn default_service_name() -> String {
    "reservation".to_owned()
}

fn default_port() -> u16 {
    3113
}

fn default_upstream_timeout() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

impl Config for ReservationConfig {}

impl ReservationConfig {
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
