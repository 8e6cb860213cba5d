// ============================================================================
// Todo Core - Authentication Service
// File: crates/todo-core/src/services/auth_service.rs
// ============================================================================
//! Email and password login

use std::sync::Arc;

use todo_security::{JwtService, PasswordService, SessionToken};
use tracing::{info, warn};

use crate::error::DomainError;
use crate::repositories::UserRepository;

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<JwtService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<JwtService>) -> Self {
        Self { users, tokens }
    }

    /// Checks the password and issues a session token. Unknown email and
    /// wrong password fail the same way.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionToken, DomainError> {
        info!("Login attempt for email: {}", email);

        // 1. Find user by email
        let user = self.users.find_by_email(email).await?.ok_or_else(|| {
            warn!("Login failed: email not found: {}", email);
            DomainError::InvalidCredentials
        })?;

        // 2. Verify password
        let password_valid = PasswordService::verify(password, &user.password_hash).map_err(|e| {
            warn!("Login failed: unreadable password hash for user {}: {}", user.id, e);
            DomainError::InvalidCredentials
        })?;

        if !password_valid {
            warn!("Login failed: invalid password for: {}", email);
            return Err(DomainError::InvalidCredentials);
        }

        // 3. Issue session token
        let token = self
            .tokens
            .issue(user.id)
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        info!("Login successful for: {}", email);
        Ok(token)
    }
}
