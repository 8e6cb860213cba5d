//! Database module (PostgreSQL and SQLite adapters)

pub mod connection;
pub mod postgres;
pub mod sqlite;

mod models;
mod task_queries;

pub use connection::{
    create_pg_pool, create_sqlite_pool, migrate_postgres, migrate_sqlite, DatabaseBackend,
};
pub use postgres::{PgTaskStore, PgUserRepository};
pub use sqlite::{SqliteTaskStore, SqliteUserRepository};
