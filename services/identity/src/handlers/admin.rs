use axum::{Json, extract::State};
use serde::Deserialize;
use uuid::Uuid;

use studio_auth_types::identity::AdminUser;
use studio_core::extract::{JsonBody, PathParam, QueryParams};
use studio_domain::pagination::{Page, PageRequest};
use studio_domain::user::UserRole;

use crate::domain::types::{RoleChange, UserFilter};
use crate::error::IdentityServiceError;
use crate::handlers::UserResponse;
use crate::state::AppState;
use crate::usecase::admin::{ChangeRoleUseCase, ListUsersUseCase};

// ── GET /auth/admin/users ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub size: Option<u64>,
}

pub async fn list_users(
    _admin: AdminUser,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListUsersQuery>,
) -> Result<Json<Page<UserResponse>>, IdentityServiceError> {
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let filter = UserFilter {
        role: query.role,
        is_active: query.is_active,
        search: query.search,
    };
    let page = usecase
        .execute(filter, PageRequest::new(query.page, query.size))
        .await?;
    Ok(Json(page.map(UserResponse::from)))
}

// ── PUT /auth/admin/users/{id}/role ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangeRoleRequest {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

pub async fn change_role(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    PathParam(user_id): PathParam<Uuid>,
    JsonBody(body): JsonBody<ChangeRoleRequest>,
) -> Result<Json<UserResponse>, IdentityServiceError> {
    let usecase = ChangeRoleUseCase {
        repo: state.user_repo(),
    };
    let change = RoleChange {
        role: body.role,
        is_active: body.is_active,
    };
    let user = usecase.execute(admin.user_id, user_id, change).await?;
    Ok(Json(user.into()))
}
