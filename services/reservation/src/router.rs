use axum::{
    Router,
    routing::{get, post},
};

use studio_core::health::{health, healthz, readyz};
use studio_core::middleware::with_observability;

use crate::handlers::{
    admin::{create_booking_for_user, list_bookings, statistics},
    booking::{cancel_booking, create_booking, get_booking, my_bookings},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/health", get(health))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Bookings
        .route("/booking/book", post(create_booking))
        .route("/booking/my-bookings", get(my_bookings))
        .route(
            "/booking/bookings/{id}",
            get(get_booking).delete(cancel_booking),
        )
        // Admin
        .route(
            "/booking/admin/bookings",
            get(list_bookings).post(create_booking_for_user),
        )
        .route("/booking/admin/statistics", get(statistics))
        .with_state(state);
    with_observability(router)
}
