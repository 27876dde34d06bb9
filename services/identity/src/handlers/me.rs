use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use studio_auth_types::identity::CurrentUser;
use studio_core::extract::JsonBody;

use crate::error::IdentityServiceError;
use crate::handlers::UserResponse;
use crate::state::AppState;
use crate::usecase::account::{
    ChangePasswordInput, ChangePasswordUseCase, GetUserUseCase, UpdateProfileInput,
    UpdateProfileUseCase,
};

// ── GET /auth/me ─────────────────────────────────────────────────────────────

pub async fn get_me(
    user: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, IdentityServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(user.user_id).await?;
    Ok(Json(user.into()))
}

// ── PUT /auth/me ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
}

pub async fn update_me(
    user: CurrentUser,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UpdateMeRequest>,
) -> Result<Json<UserResponse>, IdentityServiceError> {
    let usecase = UpdateProfileUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(user.user_id, UpdateProfileInput { name: body.name })
        .await?;
    Ok(Json(user.into()))
}

// ── POST /auth/me/change-password ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn change_password(
    user: CurrentUser,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ChangePasswordRequest>,
) -> Result<StatusCode, IdentityServiceError> {
    let usecase = ChangePasswordUseCase {
        repo: state.user_repo(),
    };
    usecase
        .execute(
            user.user_id,
            ChangePasswordInput {
                current_password: body.current_password,
                new_password: body.new_password,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
