//! Domain services (business logic)

pub mod auth_service;
pub mod session_authenticator;
pub mod task_service;
pub mod unit_of_work;

pub use auth_service::AuthService;
pub use session_authenticator::{Authenticated, SessionAuthenticator};
pub use task_service::{page_info, TaskService};
pub use unit_of_work::UnitOfWork;
