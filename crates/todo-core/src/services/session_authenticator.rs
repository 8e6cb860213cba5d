//! Resolves a session credential to the calling user

use std::sync::Arc;

use todo_security::{JwtService, SessionToken};
use tracing::warn;

use crate::domain::Identity;
use crate::error::{AuthError, DomainError};
use crate::repositories::UserRepository;

/// A verified caller plus the credential to hand back for the next request.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub identity: Identity,
    /// `None` when re-signing failed; the request still proceeds.
    pub refreshed: Option<SessionToken>,
}

pub struct SessionAuthenticator {
    users: Arc<dyn UserRepository>,
    tokens: Arc<JwtService>,
}

impl SessionAuthenticator {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<JwtService>) -> Self {
        Self { users, tokens }
    }

    /// Verifies `credential`, loads its user and issues a token valid for one
    /// more window. Storage failures surface as `DatabaseError`, not as an
    /// authentication failure.
    pub async fn authenticate(&self, credential: Option<&str>) -> Result<Authenticated, DomainError> {
        let raw = credential
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::Missing)?;

        let claims = self.tokens.verify(raw).map_err(|e| {
            warn!("Session rejected: {}", e);
            AuthError::Invalid
        })?;

        let user = self.users.find_by_id(claims.user_id).await?.ok_or_else(|| {
            warn!("Session rejected: user {} not found", claims.user_id);
            AuthError::UserNotFound
        })?;

        let refreshed = match self.tokens.issue(user.id) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("Failed to refresh session for user {}: {}", user.id, e);
                None
            }
        };

        Ok(Authenticated {
            identity: Identity::from(&user),
            refreshed,
        })
    }
}
