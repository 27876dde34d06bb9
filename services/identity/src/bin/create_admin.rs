//! Create an admin account, or promote an existing one.
//!
//! ```text
//! create-admin --email admin@example.com --password 's3cret-pass1'
//! ```

use clap::Parser;
use sea_orm::Database;

use studio_core::tracing::init_tracing;
use studio_identity::infra::db::DbUserRepository;
use studio_identity::usecase::admin::{EnsureAdminInput, EnsureAdminOutcome, EnsureAdminUseCase};

#[derive(Parser)]
#[command(name = "create-admin", about = "Create or promote a Studio admin account")]
struct Args {
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
    #[arg(long, env = "ADMIN_EMAIL")]
    email: String,
    #[arg(long, env = "ADMIN_NAME", default_value = "Administrator")]
    name: String,
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let db = Database::connect(&args.database_url).await?;
    let usecase = EnsureAdminUseCase {
        repo: DbUserRepository { db },
    };
    let (id, outcome) = usecase
        .execute(EnsureAdminInput {
            email: args.email,
            name: args.name,
            password: args.password,
        })
        .await?;

    match outcome {
        EnsureAdminOutcome::Created => println!("created admin {id}"),
        EnsureAdminOutcome::Promoted => println!("promoted {id} to admin"),
    }
    Ok(())
}
