//! Database connection pools and schema migrations

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};
use todo_shared::config::DatabaseSettings;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Postgres,
    Sqlite,
}

impl DatabaseBackend {
    /// Picks the backend from the URL scheme.
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(DatabaseBackend::Postgres)
        } else if url.starts_with("sqlite:") {
            Some(DatabaseBackend::Sqlite)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseBackend::Postgres => "postgres",
            DatabaseBackend::Sqlite => "sqlite",
        }
    }
}

pub async fn create_pg_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_seconds))
        .connect(&settings.url)
        .await
}

/// SQLite pools hold a single connection. Request transactions are opened
/// deferred and upgrade from read to write, which SQLite refuses with
/// `SQLITE_BUSY` as soon as two of them overlap; one connection makes them
/// queue on `acquire` instead. In-memory databases live as long as their
/// connection, so theirs is never closed for idleness or age.
pub async fn create_sqlite_pool(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&settings.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    if settings.max_connections > 1 {
        debug!(
            "SQLite pool capped at one connection (configured {})",
            settings.max_connections
        );
    }

    let pool_options = SqlitePoolOptions::new()
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_seconds))
        .max_connections(1);

    let pool_options = if is_in_memory(&settings.url) {
        pool_options
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options.min_connections(settings.min_connections.min(1))
    };

    pool_options.connect_with(options).await
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

pub async fn migrate_postgres(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations/postgres").run(pool).await?;
    info!("PostgreSQL schema is up to date");
    Ok(())
}

pub async fn migrate_sqlite(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations/sqlite").run(pool).await?;
    info!("SQLite schema is up to date");
    Ok(())
}
