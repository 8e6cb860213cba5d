//! Request extractors
//!
//! Rejections are reported as [`ApiError`] so every failure shares one JSON shape.

use std::sync::Arc;

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use sqlx::{Database, Transaction};
use tokio::sync::{Mutex, OwnedMutexGuard};
use todo_core::domain::Identity;
use todo_shared::TaskId;
use validator::Validate;

use crate::error::ApiError;

/// JSON body that has passed its field rules.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Numeric task id from the `{id}` path segment.
pub struct TaskIdPath(pub TaskId);

impl<S> FromRequestParts<S> for TaskIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        raw.parse::<TaskId>()
            .map(TaskIdPath)
            .map_err(|_| ApiError::BadRequest(format!("invalid todo id: {}", raw)))
    }
}

/// The identity placed in the request by the session middleware.
pub struct CurrentUser(pub Identity);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| ApiError::Unauthorized("authentication required".to_string()))
    }
}

type TxSlot<DB> = Mutex<Option<Transaction<'static, DB>>>;

/// Request-scoped transaction shared between the unit-of-work middleware and
/// the handler.
pub struct RequestTransaction<DB: Database> {
    slot: Arc<TxSlot<DB>>,
}

impl<DB: Database> Clone for RequestTransaction<DB> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<DB: Database> RequestTransaction<DB> {
    pub fn new(tx: Transaction<'static, DB>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(tx))),
        }
    }

    /// Removes the transaction once the handler has released it.
    pub async fn take(&self) -> Option<Transaction<'static, DB>> {
        self.slot.lock().await.take()
    }

    async fn lock(&self) -> Tx<DB> {
        Tx(Arc::clone(&self.slot).lock_owned().await)
    }
}

/// Exclusive access to the request transaction for the duration of a handler.
pub struct Tx<DB: Database>(OwnedMutexGuard<Option<Transaction<'static, DB>>>);

impl<DB: Database> Tx<DB> {
    /// Connection of the request transaction. Fails only after the
    /// middleware has already finished the transaction.
    pub fn conn(&mut self) -> Result<&mut DB::Connection, ApiError> {
        self.0
            .as_deref_mut()
            .ok_or_else(|| ApiError::InternalError("request transaction already finished".to_string()))
    }
}

impl<DB, S> FromRequestParts<S> for Tx<DB>
where
    DB: Database,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let handle = parts
            .extensions
            .get::<RequestTransaction<DB>>()
            .cloned()
            .ok_or_else(|| ApiError::InternalError("no request transaction".to_string()))?;

        Ok(handle.lock().await)
    }
}
