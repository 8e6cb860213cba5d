//! Domain errors

use thiserror::Error;

/// Why a session credential was not accepted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing session credential")]
    Missing,

    #[error("invalid or expired session credential")]
    Invalid,

    #[error("session user no longer exists")]
    UserNotFound,
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unauthenticated: {0}")]
    Unauthenticated(#[from] AuthError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Task not found")]
    TaskNotFound,

    #[error("Task is already completed")]
    TaskAlreadyCompleted,

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
