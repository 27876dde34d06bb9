use axum::{
    Router,
    routing::{get, post},
};

use studio_core::health::{health, healthz, readyz};
use studio_core::middleware::with_observability;

use crate::handlers::{
    internal::{class_ids, lookup_classes},
    schedule::{create_class, delete_class, get_class, list_classes, statistics, update_class},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/health", get(health))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Schedule
        .route("/schedule/schedule", get(list_classes).post(create_class))
        .route("/schedule/schedule/statistics", get(statistics))
        .route(
            "/schedule/schedule/{id}",
            get(get_class).put(update_class).delete(delete_class),
        )
        // Service-to-service
        .route("/schedule/schedule/ids", get(class_ids))
        .route("/schedule/internal/classes/lookup", post(lookup_classes))
        .with_state(state);
    with_observability(router)
}
