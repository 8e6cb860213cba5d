// ============================================================================
// Todo Infrastructure - PostgreSQL User Repository
// File: crates/todo-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use todo_core::domain::User;
use todo_core::error::DomainError;
use todo_core::repositories::UserRepository;
use todo_shared::UserId;

use crate::database::models::{db_error, UserRow, FIND_USER_BY_EMAIL, FIND_USER_BY_ID, INSERT_USER};

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(FIND_USER_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding user by id"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(FIND_USER_BY_EMAIL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding user by email"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, DomainError> {
        let row: UserRow = sqlx::query_as(INSERT_USER)
            .bind(email)
            .bind(password_hash)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("creating user"))?;

        Ok(row.into())
    }
}
