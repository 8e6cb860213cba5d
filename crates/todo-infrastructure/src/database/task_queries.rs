//! Owner-scoped task queries, written once for every backend

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use sqlx::{Database, Encode, Executor, FromRow, IntoArguments, Type};
use todo_core::domain::{Identity, NewTask, Task, TaskChanges};
use todo_core::error::DomainError;
use todo_core::repositories::ListWindow;
use todo_shared::TaskId;

use crate::database::models::{
    db_error, TaskRow, COUNT_TASKS, DELETE_TASK, FIND_TASK, INSERT_TASK, LIST_TASKS,
    SET_COMPLETION, UPDATE_TASK,
};

/// Query set shared by the PostgreSQL and SQLite stores.
pub(crate) struct TaskQueries<DB>(PhantomData<DB>);

impl<DB> TaskQueries<DB>
where
    DB: Database,
    for<'c> &'c mut DB::Connection: Executor<'c, Database = DB>,
    for<'q> DB::Arguments<'q>: IntoArguments<'q, DB>,
    for<'r> TaskRow: FromRow<'r, DB::Row>,
    for<'r> (i64,): FromRow<'r, DB::Row>,
    for<'q> i64: Encode<'q, DB> + Type<DB>,
    for<'q> bool: Encode<'q, DB> + Type<DB>,
    for<'q> String: Encode<'q, DB> + Type<DB>,
    for<'q> Option<String>: Encode<'q, DB> + Type<DB>,
    for<'q> DateTime<Utc>: Encode<'q, DB> + Type<DB>,
    for<'q> Option<DateTime<Utc>>: Encode<'q, DB> + Type<DB>,
{
    pub(crate) async fn list(
        conn: &mut DB::Connection,
        owner: &Identity,
        window: ListWindow,
    ) -> Result<Vec<Task>, DomainError> {
        let rows = sqlx::query_as::<DB, TaskRow>(LIST_TASKS)
            .bind(owner.user_id)
            .bind(window.include_completed)
            .bind(i64::from(window.limit))
            .bind(i64::try_from(window.offset).unwrap_or(i64::MAX))
            .fetch_all(&mut *conn)
            .await
            .map_err(db_error("listing tasks"))?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    pub(crate) async fn count(
        conn: &mut DB::Connection,
        owner: &Identity,
        include_completed: bool,
    ) -> Result<u64, DomainError> {
        let count = sqlx::query_scalar::<DB, i64>(COUNT_TASKS)
            .bind(owner.user_id)
            .bind(include_completed)
            .fetch_one(&mut *conn)
            .await
            .map_err(db_error("counting tasks"))?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    pub(crate) async fn find(
        conn: &mut DB::Connection,
        owner: &Identity,
        id: TaskId,
    ) -> Result<Task, DomainError> {
        Self::find_with(conn, owner, id, FIND_TASK, "finding task").await
    }

    /// Single-row read through `sql`, which binds `$1 = id` and `$2 = owner`.
    pub(crate) async fn find_with(
        conn: &mut DB::Connection,
        owner: &Identity,
        id: TaskId,
        sql: &'static str,
        action: &'static str,
    ) -> Result<Task, DomainError> {
        let row = sqlx::query_as::<DB, TaskRow>(sql)
            .bind(id)
            .bind(owner.user_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(db_error(action))?;

        row.map(Task::from).ok_or(DomainError::TaskNotFound)
    }

    pub(crate) async fn create(
        conn: &mut DB::Connection,
        owner: &Identity,
        task: &NewTask,
    ) -> Result<Task, DomainError> {
        let row = sqlx::query_as::<DB, TaskRow>(INSERT_TASK)
            .bind(owner.user_id)
            .bind(task.title.clone())
            .bind(task.description.clone())
            .bind(Utc::now())
            .fetch_one(&mut *conn)
            .await
            .map_err(db_error("creating task"))?;

        Ok(row.into())
    }

    pub(crate) async fn update(
        conn: &mut DB::Connection,
        owner: &Identity,
        id: TaskId,
        changes: &TaskChanges,
    ) -> Result<Task, DomainError> {
        let row = sqlx::query_as::<DB, TaskRow>(UPDATE_TASK)
            .bind(changes.title.clone())
            .bind(changes.description.clone())
            .bind(Utc::now())
            .bind(id)
            .bind(owner.user_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(db_error("updating task"))?;

        row.map(Task::from).ok_or(DomainError::TaskNotFound)
    }

    pub(crate) async fn set_completion(
        conn: &mut DB::Connection,
        owner: &Identity,
        id: TaskId,
        completed: bool,
    ) -> Result<Task, DomainError> {
        let now = Utc::now();
        let row = sqlx::query_as::<DB, TaskRow>(SET_COMPLETION)
            .bind(completed.then_some(now))
            .bind(now)
            .bind(id)
            .bind(owner.user_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(db_error("setting task completion"))?;

        row.map(Task::from).ok_or(DomainError::TaskNotFound)
    }

    pub(crate) async fn delete(
        conn: &mut DB::Connection,
        owner: &Identity,
        id: TaskId,
    ) -> Result<bool, DomainError> {
        let removed = sqlx::query_scalar::<DB, i64>(DELETE_TASK)
            .bind(id)
            .bind(owner.user_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(db_error("deleting task"))?;

        Ok(removed.is_some())
    }
}
