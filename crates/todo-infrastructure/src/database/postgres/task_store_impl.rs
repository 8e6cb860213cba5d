// ============================================================================
// Todo Infrastructure - PostgreSQL Task Store
// File: crates/todo-infrastructure/src/database/postgres/task_store_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{PgConnection, Postgres};
use todo_core::domain::{Identity, NewTask, Task, TaskChanges};
use todo_core::error::DomainError;
use todo_core::repositories::{ListWindow, RowLocking, TaskStore};
use todo_shared::TaskId;

use crate::database::task_queries::TaskQueries;

type Queries = TaskQueries<Postgres>;

const FIND_TASK_FOR_UPDATE: &str = r#"
    SELECT id, owner_id, title, description, completed_at, created_at, updated_at
    FROM tasks
    WHERE id = $1 AND owner_id = $2
    FOR UPDATE
"#;

/// Task store with exclusive row locks.
#[derive(Debug, Default, Clone, Copy)]
pub struct PgTaskStore;

impl PgTaskStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    type Db = Postgres;

    fn row_locking(&self) -> RowLocking {
        RowLocking::Exclusive
    }

    async fn list(
        &self,
        conn: &mut PgConnection,
        owner: &Identity,
        window: ListWindow,
    ) -> Result<Vec<Task>, DomainError> {
        Queries::list(conn, owner, window).await
    }

    async fn count(
        &self,
        conn: &mut PgConnection,
        owner: &Identity,
        include_completed: bool,
    ) -> Result<u64, DomainError> {
        Queries::count(conn, owner, include_completed).await
    }

    async fn find(
        &self,
        conn: &mut PgConnection,
        owner: &Identity,
        id: TaskId,
    ) -> Result<Task, DomainError> {
        Queries::find(conn, owner, id).await
    }

    async fn find_for_update(
        &self,
        conn: &mut PgConnection,
        owner: &Identity,
        id: TaskId,
    ) -> Result<Task, DomainError> {
        Queries::find_with(conn, owner, id, FIND_TASK_FOR_UPDATE, "locking task").await
    }

    async fn create(
        &self,
        conn: &mut PgConnection,
        owner: &Identity,
        task: &NewTask,
    ) -> Result<Task, DomainError> {
        Queries::create(conn, owner, task).await
    }

    async fn update(
        &self,
        conn: &mut PgConnection,
        owner: &Identity,
        id: TaskId,
        changes: &TaskChanges,
    ) -> Result<Task, DomainError> {
        Queries::update(conn, owner, id, changes).await
    }

    async fn set_completion(
        &self,
        conn: &mut PgConnection,
        owner: &Identity,
        id: TaskId,
        completed: bool,
    ) -> Result<Task, DomainError> {
        Queries::set_completion(conn, owner, id, completed).await
    }

    async fn delete(
        &self,
        conn: &mut PgConnection,
        owner: &Identity,
        id: TaskId,
    ) -> Result<bool, DomainError> {
        Queries::delete(conn, owner, id).await
    }
}
