// ============================================================================
// Todo API - Task Handlers
// File: crates/todo-api/src/handlers/todo.rs
// ============================================================================
//! Task handlers. All of them run inside the request transaction.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use todo_core::repositories::TaskStore;

use crate::dto::{ListTasksResponse, TaskDto};
use crate::error::ApiError;
use crate::extractors::{CurrentUser, TaskIdPath, Tx, ValidatedJson};
use crate::state::AppState;
use crate::validators::{CreateTodoRequest, ListQuery, SetDoneRequest, UpdateTodoRequest};

/// GET /todo
pub async fn list<S: TaskStore>(
    State(state): State<AppState<S>>,
    CurrentUser(identity): CurrentUser,
    Query(query): Query<ListQuery>,
    mut tx: Tx<S::Db>,
) -> Result<Json<ListTasksResponse>, ApiError> {
    let page = state
        .tasks
        .list(tx.conn()?, &identity, query.pagination(), query.include_done())
        .await?;

    Ok(Json(page.into()))
}

/// GET /todo/{id}
pub async fn get<S: TaskStore>(
    State(state): State<AppState<S>>,
    CurrentUser(identity): CurrentUser,
    TaskIdPath(id): TaskIdPath,
    mut tx: Tx<S::Db>,
) -> Result<Json<TaskDto>, ApiError> {
    let task = state.tasks.get(tx.conn()?, &identity, id).await?;
    Ok(Json(task.into()))
}

/// POST /todo
pub async fn create<S: TaskStore>(
    State(state): State<AppState<S>>,
    CurrentUser(identity): CurrentUser,
    mut tx: Tx<S::Db>,
    ValidatedJson(payload): ValidatedJson<CreateTodoRequest>,
) -> Result<(StatusCode, Json<TaskDto>), ApiError> {
    let task = state
        .tasks
        .create(tx.conn()?, &identity, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(task.into())))
}

/// PATCH /todo/{id}
pub async fn update<S: TaskStore>(
    State(state): State<AppState<S>>,
    CurrentUser(identity): CurrentUser,
    TaskIdPath(id): TaskIdPath,
    mut tx: Tx<S::Db>,
    ValidatedJson(payload): ValidatedJson<UpdateTodoRequest>,
) -> Result<Json<TaskDto>, ApiError> {
    let task = state
        .tasks
        .update(tx.conn()?, &identity, id, payload.into())
        .await?;

    Ok(Json(task.into()))
}

/// PUT /todo/{id}/done
pub async fn set_done<S: TaskStore>(
    State(state): State<AppState<S>>,
    CurrentUser(identity): CurrentUser,
    TaskIdPath(id): TaskIdPath,
    mut tx: Tx<S::Db>,
    ValidatedJson(payload): ValidatedJson<SetDoneRequest>,
) -> Result<Json<TaskDto>, ApiError> {
    let task = state
        .tasks
        .set_completion(tx.conn()?, &identity, id, payload.is_done)
        .await?;

    Ok(Json(task.into()))
}

/// DELETE /todo/{id}
///
/// 204 whether or not a row was removed.
pub async fn delete<S: TaskStore>(
    State(state): State<AppState<S>>,
    CurrentUser(identity): CurrentUser,
    TaskIdPath(id): TaskIdPath,
    mut tx: Tx<S::Db>,
) -> Result<StatusCode, ApiError> {
    state.tasks.delete(tx.conn()?, &identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
