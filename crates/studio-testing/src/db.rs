//! Postgres fixtures for tests that exercise the real repositories.
//!
//! Set `TEST_DATABASE_URL` to a database the tests may write to. Each call
//! to [`isolated_database`] creates a fresh schema and returns a pool whose
//! search path points at it, so tests can run migrations and race each other
//! without seeing other tests' rows. Without the variable the tests skip.

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use uuid::Uuid;

pub const TEST_DATABASE_URL: &str = "TEST_DATABASE_URL";

/// Enough connections for the concurrency tests to overlap.
const POOL_SIZE: u32 = 16;

/// A pool confined to a new, empty schema, or `None` when
/// `TEST_DATABASE_URL` is unset.
pub async fn isolated_database() -> Option<DatabaseConnection> {
    let Ok(url) = std::env::var(TEST_DATABASE_URL) else {
        eprintln!("{TEST_DATABASE_URL} not set, skipping Postgres test");
        return None;
    };
    let schema = format!("test_{}", Uuid::now_v7().simple());

    let setup = Database::connect(&url)
        .await
        .expect("connect to test database");
    setup
        .execute_unprepared(&format!("CREATE SCHEMA \"{schema}\""))
        .await
        .expect("create test schema");
    setup.close().await.expect("close setup connection");

    let mut options = ConnectOptions::new(url);
    options
        .max_connections(POOL_SIZE)
        .set_schema_search_path(schema)
        .sqlx_logging(false);
    Some(
        Database::connect(options)
            .await
            .expect("connect to test schema"),
    )
}
