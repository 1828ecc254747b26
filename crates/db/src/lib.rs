//! PostgreSQL persistence for the Lumina server: pool setup, embedded
//! migrations, row models, and repositories.

use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::FromRow;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to prove the database answers.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    let (one,): (i32,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;
    if one != 1 {
        return Err(sqlx::Error::Protocol(format!(
            "health check returned {one}, expected 1"
        )));
    }
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Number of server-side connections to the current database in one state.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConnectionStat {
    /// `active`, `idle`, `idle in transaction`, ... or `unknown`.
    pub state: String,
    pub connections: i64,
}

/// Connection counts per state from `pg_stat_activity`.
pub async fn connection_stats(pool: &DbPool) -> Result<Vec<ConnectionStat>, sqlx::Error> {
    sqlx::query_as::<_, ConnectionStat>(
        "SELECT COALESCE(state, 'unknown') AS state, COUNT(*) AS connections
         FROM pg_stat_activity
         WHERE datname = current_database()
         GROUP BY state
         ORDER BY state",
    )
    .fetch_all(pool)
    .await
}
