//! # Todo Core
//!
//! Domain entities, repository traits and services for the task list backend.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::{AuthError, DomainError};
