use serde::Deserialize;

use studio_auth_types::identity::TokenSecrets;
use studio_core::config::Config;

/// Identity service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct IdentityConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HMAC secret for user access tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// HMAC secret for service tokens; falls back to `JWT_SECRET`.
    #[serde(default)]
    pub service_jwt_secret: Option<String>,
    /// Shared credential other services present to mint a service token.
    /// The endpoint rejects every caller when unset.
    #[serde(default)]
    pub internal_auth_token: Option<String>,
    /// TCP port to listen on (default 3111). Env var: `IDENTITY_PORT`.
    #[serde(default = "default_port")]
    pub identity_port: u16,
    #[serde(default = "default_access_token_ttl")]
    pub access_token_ttl_secs: u64,
    #[serde(default = "default_service_token_ttl")]
    pub service_token_ttl_secs: u64,
    /// Apply pending migrations at startup (default true).
    #[serde(default = "default_true")]
    pub run_migrations: bool,
    /// Bootstrap admin account, ensured at startup when both are set.
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default)]
    pub admin_password: Option<String>,
    #[serde(default = "default_admin_name")]
    pub admin_name: String,
}

fn default_port() -> u16 {
    3111
}

fn default_access_token_ttl() -> u64 {
    30 * 60
}

fn default_service_token_ttl() -> u64 {
    5 * 60
}

fn default_true() -> bool {
    true
}

fn default_admin_name() -> String {
    "Administrator".to_owned()
}

impl Config for IdentityConfig {}

impl IdentityConfig {
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
