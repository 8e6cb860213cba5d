//! Repository traits (ports)

pub mod task_store;
pub mod user_repository;

pub use task_store::{DbConnection, ListWindow, RowLocking, TaskStore};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use user_repository::MockUserRepository;
