//! One database transaction per request

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use todo_core::repositories::TaskStore;
use todo_core::services::unit_of_work::{commit, rollback};
use tracing::warn;

use crate::error::ApiError;
use crate::extractors::RequestTransaction;
use crate::state::AppState;

/// Opens the request transaction, runs the handler, then commits for
/// success/redirect responses and rolls back for everything else. A failed
/// commit replaces the response with a 500.
///
/// If the request future is dropped the transaction is dropped with it and the
/// driver rolls it back.
pub async fn unit_of_work<S: TaskStore>(
    State(state): State<AppState<S>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let handle = RequestTransaction::new(state.uow.begin().await?);
    request.extensions_mut().insert(handle.clone());

    let response = next.run(request).await;

    let Some(tx) = handle.take().await else {
        warn!("Request transaction was finished before the response");
        return Ok(response);
    };

    let status = response.status();
    if status.is_success() || status.is_redirection() {
        commit(tx).await?;
    } else {
        rollback(tx).await;
    }

    Ok(response)
}
