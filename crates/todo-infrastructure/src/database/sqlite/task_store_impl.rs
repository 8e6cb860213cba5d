// ============================================================================
// Todo Infrastructure - SQLite Task Store
// File: crates/todo-infrastructure/src/database/sqlite/task_store_impl.rs
// Description: Development/test backend. SQLite has no row locks, so
//              find_for_update degrades to a plain read.
// ============================================================================

use async_trait::async_trait;
use sqlx::{Sqlite, SqliteConnection};
use todo_core::domain::{Identity, NewTask, Task, TaskChanges};
use todo_core::error::DomainError;
use todo_core::repositories::{ListWindow, RowLocking, TaskStore};
use todo_shared::TaskId;
use tracing::debug;

use crate::database::task_queries::TaskQueries;

type Queries = TaskQueries<Sqlite>;

#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteTaskStore;

impl SqliteTaskStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    type Db = Sqlite;

    fn row_locking(&self) -> RowLocking {
        RowLocking::Unsupported
    }

    async fn list(
        &self,
        conn: &mut SqliteConnection,
        owner: &Identity,
        window: ListWindow,
    ) -> Result<Vec<Task>, DomainError> {
        Queries::list(conn, owner, window).await
    }

    async fn count(
        &self,
        conn: &mut SqliteConnection,
        owner: &Identity,
        include_completed: bool,
    ) -> Result<u64, DomainError> {
        Queries::count(conn, owner, include_completed).await
    }

    async fn find(
        &self,
        conn: &mut SqliteConnection,
        owner: &Identity,
        id: TaskId,
    ) -> Result<Task, DomainError> {
        Queries::find(conn, owner, id).await
    }

    async fn find_for_update(
        &self,
        conn: &mut SqliteConnection,
        owner: &Identity,
        id: TaskId,
    ) -> Result<Task, DomainError> {
        debug!("Row locks unavailable on SQLite, reading task {} without a lock", id);
        Queries::find(conn, owner, id).await
    }

    async fn create(
        &self,
        conn: &mut SqliteConnection,
        owner: &Identity,
        task: &NewTask,
    ) -> Result<Task, DomainError> {
        Queries::create(conn, owner, task).await
    }

    async fn update(
        &self,
        conn: &mut SqliteConnection,
        owner: &Identity,
        id: TaskId,
        changes: &TaskChanges,
    ) -> Result<Task, DomainError> {
        Queries::update(conn, owner, id, changes).await
    }

    async fn set_completion(
        &self,
        conn: &mut SqliteConnection,
        owner: &Identity,
        id: TaskId,
        completed: bool,
    ) -> Result<Task, DomainError> {
        Queries::set_completion(conn, owner, id, completed).await
    }

    async fn delete(
        &self,
        conn: &mut SqliteConnection,
        owner: &Identity,
        id: TaskId,
    ) -> Result<bool, DomainError> {
        Queries::delete(conn, owner, id).await
    }
}
