//! Route table

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use todo_core::repositories::TaskStore;

use crate::handlers::{auth, health, todo};
use crate::middleware::{require_session, unit_of_work};
use crate::state::AppState;

/// Builds the application router.
///
/// `/health` and `/auth/login` are public. Everything under `/todo` passes the
/// session check first and then runs inside the request transaction.
pub fn router<S: TaskStore>(state: AppState<S>) -> Router {
    let protected = Router::new()
        .route("/todo", get(todo::list::<S>).post(todo::create::<S>))
        .route(
            "/todo/{id}",
            get(todo::get::<S>)
                .patch(todo::update::<S>)
                .delete(todo::delete::<S>),
        )
        .route("/todo/{id}/done", put(todo::set_done::<S>))
        .route_layer(from_fn_with_state(state.clone(), unit_of_work::<S>))
        .route_layer(from_fn_with_state(state.clone(), require_session::<S>));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/auth/login", post(auth::login::<S>))
        .merge(protected)
        .with_state(state)
}
