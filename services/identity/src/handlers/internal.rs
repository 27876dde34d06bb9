use axum::{Json, extract::State, http::HeaderMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use studio_auth_types::identity::{ServiceCaller, bearer_token};
use studio_core::extract::{JsonBody, PathParam};

use crate::error::IdentityServiceError;
use crate::handlers::UserResponse;
use crate::state::AppState;
use crate::usecase::account::GetUserUseCase;
use crate::usecase::service_token::{IssueServiceTokenInput, IssueServiceTokenUseCase};

// ── GET /auth/internal/users/{id} ────────────────────────────────────────────

pub async fn get_user(
    caller: ServiceCaller,
    State(state): State<AppState>,
    PathParam(user_id): PathParam<Uuid>,
) -> Result<Json<UserResponse>, IdentityServiceError> {
    tracing::debug!(service = %caller.service, user_id = %user_id, "internal user lookup");
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(user_id).await?;
    Ok(Json(user.into()))
}

// ── POST /auth/internal/service-token ────────────────────────────────────────

#[derive(Deserialize)]
pub struct ServiceTokenRequest {
    pub service_name: String,
}

#[derive(Debug, Serialize)]
pub struct ServiceTokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

pub async fn issue_service_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(body): JsonBody<ServiceTokenRequest>,
) -> Result<Json<ServiceTokenResponse>, IdentityServiceError> {
    let usecase = IssueServiceTokenUseCase {
        internal_auth_token: state.internal_auth_token.clone(),
        service_secret: state.secrets.service.clone(),
        ttl_secs: state.service_ttl_secs,
    };
    let issued = usecase.execute(IssueServiceTokenInput {
        credential: bearer_token(&headers).map(str::to_owned),
        service_name: body.service_name,
    })?;
    Ok(Json(ServiceTokenResponse {
        access_token: issued.token,
        token_type: "bearer",
        expires_in: issued.expires_in,
    }))
}
