//! # Todo API
//!
//! HTTP handlers, middleware, extractors, DTOs and validators.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod validators;

pub use error::ApiError;
pub use router::router;
pub use state::AppState;
