//! # Todo Shared
//! 
//! Shared configuration, types, constants and telemetry for the task list backend.

pub mod constants;
pub mod types;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use config::AppConfig;
pub use error::AppError;
