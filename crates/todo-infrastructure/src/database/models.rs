//! Row types and SQL shared by both backends
//!
//! PostgreSQL and SQLite both accept `$N` placeholders and `RETURNING`, so
//! only the locking read differs between them.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use todo_core::domain::{Task, User};
use todo_core::error::DomainError;
use tracing::error;

// Internal row types for SQLx mapping
#[derive(Debug, FromRow)]
pub(crate) struct TaskRow {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            description: row.description,
            completed_at: row.completed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

pub(crate) fn db_error(action: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| {
        error!("Database error {}: {}", action, e);
        DomainError::DatabaseError(e.to_string())
    }
}

pub(crate) const LIST_TASKS: &str = r#"
    SELECT id, owner_id, title, description, completed_at, created_at, updated_at
    FROM tasks
    WHERE owner_id = $1 AND ($2 OR completed_at IS NULL)
    ORDER BY updated_at DESC, id DESC
    LIMIT $3 OFFSET $4
"#;

pub(crate) const COUNT_TASKS: &str = r#"
    SELECT COUNT(*)
    FROM tasks
    WHERE owner_id = $1 AND ($2 OR completed_at IS NULL)
"#;

pub(crate) const FIND_TASK: &str = r#"
    SELECT id, owner_id, title, description, completed_at, created_at, updated_at
    FROM tasks
    WHERE id = $1 AND owner_id = $2
"#;

pub(crate) const INSERT_TASK: &str = r#"
    INSERT INTO tasks (owner_id, title, description, completed_at, created_at, updated_at)
    VALUES ($1, $2, $3, NULL, $4, $4)
    RETURNING id, owner_id, title, description, completed_at, created_at, updated_at
"#;

pub(crate) const UPDATE_TASK: &str = r#"
    UPDATE tasks
    SET title = COALESCE($1, title),
        description = COALESCE($2, description),
        updated_at = $3
    WHERE id = $4 AND owner_id = $5
    RETURNING id, owner_id, title, description, completed_at, created_at, updated_at
"#;

pub(crate) const SET_COMPLETION: &str = r#"
    UPDATE tasks
    SET completed_at = $1,
        updated_at = $2
    WHERE id = $3 AND owner_id = $4
    RETURNING id, owner_id, title, description, completed_at, created_at, updated_at
"#;

pub(crate) const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = $1 AND owner_id = $2 RETURNING id";

pub(crate) const FIND_USER_BY_ID: &str = r#"
    SELECT id, email, password_hash, created_at
    FROM users
    WHERE id = $1
"#;

pub(crate) const FIND_USER_BY_EMAIL: &str = r#"
    SELECT id, email, password_hash, created_at
    FROM users
    WHERE LOWER(email) = LOWER($1)
"#;

pub(crate) const INSERT_USER: &str = r#"
    INSERT INTO users (email, password_hash, created_at)
    VALUES ($1, $2, $3)
    RETURNING id, email, password_hash, created_at
"#;
