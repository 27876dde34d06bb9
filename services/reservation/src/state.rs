use std::time::Duration;

use anyhow::Context as _;
use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use studio_auth_types::identity::TokenSecrets;

use crate::config::ReservationConfig;
use crate::infra::db::DbBookingRepository;
use crate::infra::http::{HttpCatalogClient, HttpIdentityClient};
use crate::infra::service_token::ServiceTokenProvider;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub secrets: TokenSecrets,
    pub catalog: HttpCatalogClient,
    pub identity: HttpIdentityClient,
    pub enforce_weekday: bool,
}

impl AppState {
    /// Build the state and the upstream clients. Both clients share one
    /// connection pool and one service-token cache.
    pub fn new(db: DatabaseConnection, config: &ReservationConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .context("build upstream http client")?;
        let tokens = ServiceTokenProvider::new(
            http.clone(),
            &config.identity_url,
            config.internal_auth_token.clone(),
            config.service_name.clone(),
        );
        Ok(Self {
            db,
            secrets: config.token_secrets(),
            catalog: HttpCatalogClient::new(http.clone(), &config.catalog_url, tokens.clone()),
            identity: HttpIdentityClient::new(http, &config.identity_url, tokens),
            enforce_weekday: config.enforce_weekday,
        })
    }

    pub fn booking_repo(&self) -> DbBookingRepository {
        DbBookingRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for TokenSecrets {
    fn from_ref(state: &AppState) -> Self {
        state.secrets.clone()
    }
}
