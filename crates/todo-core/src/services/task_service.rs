// ============================================================================
// Todo Core - Task Lifecycle Service
// File: crates/todo-core/src/services/task_service.rs
// Description: Ownership-scoped task operations on top of a TaskStore
// ============================================================================
//! Task lifecycle rules
//!
//! Content edits and completion toggles run lock-then-mutate inside their own
//! sub-transaction. A completed task only accepts a toggle back to active, and
//! asking for the state a task is already in changes nothing.

use std::sync::Arc;

use todo_shared::{Pagination, TaskId};
use tracing::{debug, info, warn};

use crate::domain::{Identity, NewTask, PageInfo, Task, TaskChanges, TaskPage};
use crate::error::DomainError;
use crate::repositories::{DbConnection, ListWindow, RowLocking, TaskStore};
use crate::services::unit_of_work::{begin_nested, commit, finish, rollback};

pub struct TaskService<S: TaskStore> {
    store: Arc<S>,
}

impl<S: TaskStore> Clone for TaskService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: TaskStore> TaskService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn row_locking(&self) -> RowLocking {
        self.store.row_locking()
    }

    pub async fn list(
        &self,
        conn: &mut DbConnection<S>,
        identity: &Identity,
        pagination: Pagination,
        include_completed: bool,
    ) -> Result<TaskPage, DomainError> {
        let window = ListWindow {
            limit: pagination.limit,
            offset: u64::from(pagination.page.saturating_sub(1)) * u64::from(pagination.limit),
            include_completed,
        };

        let tasks = self.store.list(&mut *conn, identity, window).await?;
        let total = self.store.count(&mut *conn, identity, include_completed).await?;

        Ok(TaskPage {
            tasks,
            page_info: page_info(pagination, total),
        })
    }

    pub async fn get(
        &self,
        conn: &mut DbConnection<S>,
        identity: &Identity,
        id: TaskId,
    ) -> Result<Task, DomainError> {
        self.store.find(conn, identity, id).await
    }

    pub async fn create(
        &self,
        conn: &mut DbConnection<S>,
        identity: &Identity,
        new_task: NewTask,
    ) -> Result<Task, DomainError> {
        let task = self.store.create(conn, identity, &new_task).await?;
        info!("Task {} created for user {}", task.id, identity.user_id);
        Ok(task)
    }

    /// Edits title and/or description. Fails with `TaskAlreadyCompleted` for a
    /// completed task; an empty edit returns the current row untouched.
    pub async fn update(
        &self,
        conn: &mut DbConnection<S>,
        identity: &Identity,
        id: TaskId,
        changes: TaskChanges,
    ) -> Result<Task, DomainError> {
        let mut scope = begin_nested::<S::Db>(conn).await?;

        let current = match self.store.find_for_update(&mut *scope, identity, id).await {
            Ok(task) => task,
            Err(e) => {
                rollback(scope).await;
                return Err(e);
            }
        };

        if changes.is_empty() {
            commit(scope).await?;
            return Ok(current);
        }

        if current.is_completed() {
            warn!("Update rejected: task {} is already completed", id);
            rollback(scope).await;
            return Err(DomainError::TaskAlreadyCompleted);
        }

        let outcome = self.store.update(&mut *scope, identity, id, &changes).await;
        let updated = finish(scope, outcome).await?;

        info!("Task {} updated by user {}", id, identity.user_id);
        Ok(updated)
    }

    /// Moves a task to the requested completion state. Requesting the current
    /// state returns the task as is, without bumping `updated_at`.
    pub async fn set_completion(
        &self,
        conn: &mut DbConnection<S>,
        identity: &Identity,
        id: TaskId,
        completed: bool,
    ) -> Result<Task, DomainError> {
        let mut scope = begin_nested::<S::Db>(conn).await?;

        let current = match self.store.find_for_update(&mut *scope, identity, id).await {
            Ok(task) => task,
            Err(e) => {
                rollback(scope).await;
                return Err(e);
            }
        };

        if current.is_completed() == completed {
            debug!("Task {} already {}", id, current.status().as_str());
            rollback(scope).await;
            return Ok(current);
        }

        let outcome = self.store.set_completion(&mut *scope, identity, id, completed).await;
        let task = finish(scope, outcome).await?;

        info!("Task {} marked {} by user {}", id, task.status().as_str(), identity.user_id);
        Ok(task)
    }

    /// Deleting a missing or foreign task is not an error. Returns whether a
    /// row was removed.
    pub async fn delete(
        &self,
        conn: &mut DbConnection<S>,
        identity: &Identity,
        id: TaskId,
    ) -> Result<bool, DomainError> {
        let removed = self.store.delete(conn, identity, id).await?;
        if removed {
            info!("Task {} deleted by user {}", id, identity.user_id);
        } else {
            debug!("Delete of task {} by user {} matched nothing", id, identity.user_id);
        }
        Ok(removed)
    }
}

/// Page metadata for `total` matching rows. There is always at least one page.
pub fn page_info(pagination: Pagination, total: u64) -> PageInfo {
    let limit = pagination.limit.max(1);
    let total_pages = total.div_ceil(u64::from(limit)).max(1);
    let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);

    PageInfo {
        total_pages,
        current_page: pagination.page,
        has_next: pagination.page < total_pages,
        has_prev: pagination.page > 1,
        limit,
    }
}
