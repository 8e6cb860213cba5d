//! Task store trait (port)
//!
//! Every operation takes the caller's [`Identity`] and the connection of the
//! enclosing transaction. Rows owned by someone else are indistinguishable
//! from rows that do not exist.

use async_trait::async_trait;
use sqlx::Database;
use todo_shared::TaskId;

use crate::domain::{Identity, NewTask, Task, TaskChanges};
use crate::error::DomainError;

/// Connection type a store runs its queries on.
pub type DbConnection<S> = <<S as TaskStore>::Db as Database>::Connection;

/// Whether `find_for_update` can hold an exclusive row lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLocking {
    /// `SELECT ... FOR UPDATE`, held until the transaction ends.
    Exclusive,
    /// Plain read. Concurrent read-check-write sequences may interleave.
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    pub limit: u32,
    pub offset: u64,
    pub include_completed: bool,
}

#[async_trait]
pub trait TaskStore: Send + Sync + 'static {
    type Db: Database;

    fn row_locking(&self) -> RowLocking;

    /// Ordered by `updated_at` then `id`, newest first.
    async fn list(
        &self,
        conn: &mut <Self::Db as Database>::Connection,
        owner: &Identity,
        window: ListWindow,
    ) -> Result<Vec<Task>, DomainError>;

    async fn count(
        &self,
        conn: &mut <Self::Db as Database>::Connection,
        owner: &Identity,
        include_completed: bool,
    ) -> Result<u64, DomainError>;

    /// `TaskNotFound` when absent or not owned.
    async fn find(
        &self,
        conn: &mut <Self::Db as Database>::Connection,
        owner: &Identity,
        id: TaskId,
    ) -> Result<Task, DomainError>;

    /// Same as [`find`](Self::find), additionally locking the row for the rest
    /// of the enclosing transaction when [`RowLocking::Exclusive`].
    async fn find_for_update(
        &self,
        conn: &mut <Self::Db as Database>::Connection,
        owner: &Identity,
        id: TaskId,
    ) -> Result<Task, DomainError>;

    async fn create(
        &self,
        conn: &mut <Self::Db as Database>::Connection,
        owner: &Identity,
        task: &NewTask,
    ) -> Result<Task, DomainError>;

    /// Applies the supplied fields and bumps `updated_at`. Does not look at
    /// the completion state.
    async fn update(
        &self,
        conn: &mut <Self::Db as Database>::Connection,
        owner: &Identity,
        id: TaskId,
        changes: &TaskChanges,
    ) -> Result<Task, DomainError>;

    /// Writes `completed_at` unconditionally and bumps `updated_at`.
    async fn set_completion(
        &self,
        conn: &mut <Self::Db as Database>::Connection,
        owner: &Identity,
        id: TaskId,
        completed: bool,
    ) -> Result<Task, DomainError>;

    /// Returns whether a row was removed.
    async fn delete(
        &self,
        conn: &mut <Self::Db as Database>::Connection,
        owner: &Identity,
        id: TaskId,
    ) -> Result<bool, DomainError>;
}
