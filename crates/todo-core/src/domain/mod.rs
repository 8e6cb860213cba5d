//! # Todo Core - Domain Module
//!
//! Domain entities for the task list backend.

pub mod task;
pub mod user;

pub use task::{NewTask, PageInfo, Task, TaskChanges, TaskPage, TaskStatus};
pub use user::{Identity, User};
