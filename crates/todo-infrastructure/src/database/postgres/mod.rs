//! PostgreSQL repository implementations

pub mod task_store_impl;
pub mod user_repo_impl;

pub use task_store_impl::PgTaskStore;
pub use user_repo_impl::PgUserRepository;
