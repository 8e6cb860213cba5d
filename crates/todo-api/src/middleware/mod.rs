//! Request middleware

pub mod session;
pub mod unit_of_work;

pub use session::{require_session, session_cookie, session_cookie_value};
pub use unit_of_work::unit_of_work;
