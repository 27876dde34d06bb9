use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use studio_catalog::config::CatalogConfig;
use studio_catalog::router::build_router;
use studio_catalog::state::AppState;
use studio_catalog_migration::Migrator;
use studio_core::config::Config;
use studio_core::shutdown::shutdown_signal;
use studio_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = CatalogConfig::from_env().expect("invalid catalog configuration");

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .expect("failed to apply migrations");
        info!("migrations applied");
    }

    let state = AppState {
        db,
        secrets: config.token_secrets(),
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.catalog_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("catalog service listening on {http_addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}
