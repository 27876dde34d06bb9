use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info};

use studio_core::config::Config;
use studio_core::shutdown::shutdown_signal;
use studio_core::tracing::init_tracing;
use studio_identity::config::IdentityConfig;
use studio_identity::router::build_router;
use studio_identity::state::AppState;
use studio_identity::usecase::admin::{EnsureAdminInput, EnsureAdminUseCase};
use studio_identity_migration::Migrator;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = IdentityConfig::from_env().expect("invalid identity configuration");

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .expect("failed to apply migrations");
        info!("migrations applied");
    }

    let state = AppState::new(db, &config);

    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        let usecase = EnsureAdminUseCase {
            repo: state.user_repo(),
        };
        let result = usecase
            .execute(EnsureAdminInput {
                email: email.clone(),
                name: config.admin_name.clone(),
                password: password.clone(),
            })
            .await;
        if let Err(e) = result {
            error!(error = %e, "admin bootstrap failed");
        }
    }

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.identity_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("identity service listening on {http_addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}
