use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::BookingServiceError;

/// Refresh this long before the cached token expires.
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

#[derive(Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        now + REFRESH_MARGIN < self.expires_at
    }
}

#[derive(Serialize)]
struct ServiceTokenRequest<'a> {
    service_name: &'a str,
}

#[derive(Deserialize)]
struct ServiceTokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Fetches service tokens from identity and caches them until shortly
/// before expiry. Clones share one cache.
#[derive(Clone)]
pub struct ServiceTokenProvider {
    http: reqwest::Client,
    endpoint: String,
    internal_auth_token: String,
    service_name: String,
    cache: Arc<Mutex<Option<CachedToken>>>,
}

impl ServiceTokenProvider {
    pub fn new(
        http: reqwest::Client,
        identity_url: &str,
        internal_auth_token: String,
        service_name: String,
    ) -> Self {
        Self {
            http,
            endpoint: format!(
                "{}/auth/internal/service-token",
                identity_url.trim_end_matches('/')
            ),
            internal_auth_token,
            service_name,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    /// A token valid for at least another minute.
    pub async fn token(&self) -> Result<String, BookingServiceError> {
        // Held across the fetch so concurrent callers wait for one refresh.
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref().filter(|c| c.is_fresh(Instant::now())) {
            return Ok(cached.token.clone());
        }
        let fetched = self.fetch().await?;
        let token = fetched.token.clone();
        *cache = Some(fetched);
        Ok(token)
    }

    /// Drop the cached token, e.g. after an upstream rejected it.
    pub async fn invalidate(&self) {
        self.cache.lock().await.take();
    }

    async fn fetch(&self) -> Result<CachedToken, BookingServiceError> {
        let requested_at = Instant::now();
        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.internal_auth_token)
            .json(&ServiceTokenRequest {
                service_name: &self.service_name,
            })
            .send()
            .await
            .map_err(|e| BookingServiceError::upstream(e, "request service token"))?;
        if !resp.status().is_success() {
            return Err(BookingServiceError::upstream(
                anyhow::anyhow!("identity answered {}", resp.status()),
                "request service token",
            ));
        }
        let body: ServiceTokenResponse = resp
            .json()
            .await
            .map_err(|e| BookingServiceError::upstream(e, "decode service token"))?;
        tracing::debug!(expires_in = body.expires_in, "service token refreshed");
        Ok(CachedToken {
            token: body.access_token,
            expires_at: requested_at + Duration::from_secs(body.expires_in),
        })
    }
}
