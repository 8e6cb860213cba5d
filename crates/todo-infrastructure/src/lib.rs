//! # Todo Infrastructure
//!
//! Database adapters for the core ports: PostgreSQL for production, SQLite
//! for development and tests.

pub mod database;

pub use database::{
    create_pg_pool, create_sqlite_pool, migrate_postgres, migrate_sqlite, DatabaseBackend,
    PgTaskStore, PgUserRepository, SqliteTaskStore, SqliteUserRepository,
};
