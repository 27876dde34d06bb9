use axum::{
    Router,
    routing::{get, post, put},
};

use studio_core::health::{health, healthz, readyz};
use studio_core::middleware::with_observability;

use crate::handlers::{
    admin::{change_role, list_users},
    auth::{login, register},
    internal::{get_user, issue_service_token},
    me::{change_password, get_me, update_me},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/health", get(health))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Public
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        // Current user
        .route("/auth/me", get(get_me).put(update_me))
        .route("/auth/me/change-password", post(change_password))
        // Admin
        .route("/auth/admin/users", get(list_users))
        .route("/auth/admin/users/{id}/role", put(change_role))
        // Service-to-service
        .route("/auth/internal/users/{id}", get(get_user))
        .route("/auth/internal/service-token", post(issue_service_token))
        .with_state(state);
    with_observability(router)
}
