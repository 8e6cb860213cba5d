//! # Todo Security
//! 
//! Security utilities: session tokens and password verification.

pub mod jwt;
pub mod password;

pub use jwt::{JwtError, JwtService, SessionClaims, SessionToken};
pub use password::{PasswordError, PasswordService};
