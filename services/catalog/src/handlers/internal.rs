use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use studio_auth_types::identity::ServiceCaller;
use studio_core::extract::{JsonBody, QueryParams};

use crate::error::CatalogServiceError;
use crate::handlers::ClassResponse;
use crate::state::AppState;
use crate::usecase::lookup::{FindClassIdsUseCase, LookupClassesUseCase};

// ── GET /schedule/schedule/ids ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ClassIdsQuery {
    pub teacher: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClassIdsResponse {
    pub ids: Vec<Uuid>,
}

pub async fn class_ids(
    caller: ServiceCaller,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ClassIdsQuery>,
) -> Result<Json<ClassIdsResponse>, CatalogServiceError> {
    tracing::debug!(service = %caller.service, "class id lookup");
    let usecase = FindClassIdsUseCase {
        repo: state.class_repo(),
    };
    let ids = usecase.execute(query.teacher, query.name).await?;
    Ok(Json(ClassIdsResponse { ids }))
}

// ── POST /schedule/internal/classes/lookup ───────────────────────────────────

#[derive(Deserialize)]
pub struct LookupRequest {
    pub ids: Vec<Uuid>,
}

#[derive(Serialize)]
pub struct LookupResponse {
    pub items: Vec<ClassResponse>,
}

pub async fn lookup_classes(
    caller: ServiceCaller,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LookupRequest>,
) -> Result<Json<LookupResponse>, CatalogServiceError> {
    tracing::debug!(service = %caller.service, count = body.ids.len(), "bulk class lookup");
    let usecase = LookupClassesUseCase {
        repo: state.class_repo(),
    };
    let items = usecase
        .execute(body.ids)
        .await?
        .into_iter()
        .map(ClassResponse::from)
        .collect();
    Ok(Json(LookupResponse { items }))
}
