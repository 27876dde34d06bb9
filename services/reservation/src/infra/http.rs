use chrono::NaiveTime;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::repository::{CatalogPort, IdentityPort};
use crate::domain::types::{ClassSnapshot, UserSnapshot};
use crate::error::BookingServiceError;
use crate::infra::service_token::ServiceTokenProvider;

fn join(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}

/// Map a non-success reply to `Upstream`, dropping the cached service
/// token when the upstream rejected it.
async fn reject_status(
    status: StatusCode,
    tokens: Option<&ServiceTokenProvider>,
    context: &'static str,
) -> BookingServiceError {
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        if let Some(tokens) = tokens {
            tokens.invalidate().await;
        }
    }
    BookingServiceError::upstream(anyhow::anyhow!("upstream answered {status}"), context)
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ClassDto {
    id: Uuid,
    name: String,
    teacher: String,
    weekday: u8,
    start_time: NaiveTime,
    capacity: u32,
    active: bool,
}

impl From<ClassDto> for ClassSnapshot {
    fn from(dto: ClassDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            teacher: dto.teacher,
            weekday: dto.weekday,
            start_time: dto.start_time,
            capacity: dto.capacity,
            active: dto.active,
        }
    }
}

#[derive(Serialize)]
struct LookupRequest<'a> {
    ids: &'a [Uuid],
}

#[derive(Deserialize)]
struct LookupResponse {
    items: Vec<ClassDto>,
}

#[derive(Deserialize)]
struct ClassIdsResponse {
    ids: Vec<Uuid>,
}

/// HTTP client implementing `CatalogPort` against the catalog service.
#[derive(Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: String,
    tokens: ServiceTokenProvider,
}

impl HttpCatalogClient {
    pub fn new(http: reqwest::Client, base_url: &str, tokens: ServiceTokenProvider) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            tokens,
        }
    }
}

impl CatalogPort for HttpCatalogClient {
    async fn get_class(&self, id: Uuid) -> Result<Option<ClassSnapshot>, BookingServiceError> {
        const CONTEXT: &str = "fetch class template";
        let resp = self
            .http
            .get(join(&self.base_url, &format!("/schedule/schedule/{id}")))
            .send()
            .await
            .map_err(|e| BookingServiceError::upstream(e, CONTEXT))?;
        match resp.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let dto: ClassDto = resp
                    .json()
                    .await
                    .map_err(|e| BookingServiceError::upstream(e, CONTEXT))?;
                Ok(Some(dto.into()))
            }
            status => Err(reject_status(status, None, CONTEXT).await),
        }
    }

    async fn lookup_classes(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<ClassSnapshot>, BookingServiceError> {
        const CONTEXT: &str = "look up class templates";
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let token = self.tokens.token().await?;
        let resp = self
            .http
            .post(join(&self.base_url, "/schedule/internal/classes/lookup"))
            .bearer_auth(token)
            .json(&LookupRequest { ids })
            .send()
            .await
            .map_err(|e| BookingServiceError::upstream(e, CONTEXT))?;
        if !resp.status().is_success() {
            return Err(reject_status(resp.status(), Some(&self.tokens), CONTEXT).await);
        }
        let body: LookupResponse = resp
            .json()
            .await
            .map_err(|e| BookingServiceError::upstream(e, CONTEXT))?;
        Ok(body.items.into_iter().map(ClassSnapshot::from).collect())
    }

    async fn find_class_ids(
        &self,
        teacher: Option<&str>,
        name: Option<&str>,
    ) -> Result<Vec<Uuid>, BookingServiceError> {
        const CONTEXT: &str = "find class ids";
        let params = teacher
            .map(|t| ("teacher", t))
            .into_iter()
            .chain(name.map(|n| ("name", n)));
        let url = Url::parse_with_params(&join(&self.base_url, "/schedule/schedule/ids"), params)
            .map_err(|e| BookingServiceError::upstream(e, CONTEXT))?;
        let token = self.tokens.token().await?;
        let resp = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| BookingServiceError::upstream(e, CONTEXT))?;
        if !resp.status().is_success() {
            return Err(reject_status(resp.status(), Some(&self.tokens), CONTEXT).await);
        }
        let body: ClassIdsResponse = resp
            .json()
            .await
            .map_err(|e| BookingServiceError::upstream(e, CONTEXT))?;
        Ok(body.ids)
    }
}

// ── Identity ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct UserDto {
    id: Uuid,
    name: String,
    email: String,
    is_active: bool,
}

/// HTTP client implementing `IdentityPort` against the identity service.
#[derive(Clone)]
pub struct HttpIdentityClient {
    http: reqwest::Client,
    base_url: String,
    tokens: ServiceTokenProvider,
}

impl HttpIdentityClient {
    pub fn new(http: reqwest::Client, base_url: &str, tokens: ServiceTokenProvider) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            tokens,
        }
    }
}

impl IdentityPort for HttpIdentityClient {
    async fn get_user(&self, id: Uuid) -> Result<Option<UserSnapshot>, BookingServiceError> {
        const CONTEXT: &str = "fetch user";
        let token = self.tokens.token().await?;
        let resp = self
            .http
            .get(join(&self.base_url, &format!("/auth/internal/users/{id}")))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| BookingServiceError::upstream(e, CONTEXT))?;
        match resp.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let dto: UserDto = resp
                    .json()
                    .await
                    .map_err(|e| BookingServiceError::upstream(e, CONTEXT))?;
                Ok(Some(UserSnapshot {
                    id: dto.id,
                    name: dto.name,
                    email: dto.email,
                    is_active: dto.is_active,
                }))
            }
            status => Err(reject_status(status, Some(&self.tokens), CONTEXT).await),
        }
    }
}
