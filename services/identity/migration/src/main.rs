use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(studio_identity_migration::Migrator).await;
}
