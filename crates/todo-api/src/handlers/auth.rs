// ============================================================================
// Todo API - Auth Handlers
// File: crates/todo-api/src/handlers/auth.rs
// ============================================================================
//! Login handler

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
    Json,
};
use todo_core::repositories::TaskStore;

use crate::dto::MessageResponse;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::middleware::session_cookie;
use crate::state::AppState;
use crate::validators::LoginRequest;

/// Login handler - POST /auth/login
pub async fn login<S: TaskStore>(
    State(state): State<AppState<S>>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Response, ApiError> {
    let token = state.auth.login(&payload.email, &payload.password).await?;
    let cookie = session_cookie(&state.session, &token)?;

    Ok((
        [(SET_COOKIE, cookie)],
        Json(MessageResponse::new("login success")),
    )
        .into_response())
}
