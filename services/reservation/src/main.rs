use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use studio_core::config::Config;
use studio_core::shutdown::shutdown_signal;
use studio_core::tracing::init_tracing;
use studio_reservation::config::ReservationConfig;
use studio_reservation::router::build_router;
use studio_reservation::state::AppState;
use studio_reservation_migration::Migrator;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ReservationConfig::from_env().expect("invalid reservation configuration");

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .expect("failed to apply migrations");
        info!("migrations applied");
    }

    let state = AppState::new(db, &config).expect("failed to build application state");
    info!(
        catalog_url = %config.catalog_url,
        identity_url = %config.identity_url,
        enforce_weekday = config.enforce_weekday,
        "upstreams configured"
    );

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.reservation_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("reservation service listening on {http_addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}
