//! User repository trait (port)

use async_trait::async_trait;
use todo_shared::UserId;

use crate::domain::User;
use crate::error::DomainError;

/// Read access to users. Signup lives outside this service, so `create`
/// exists for fixtures and tooling only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;
    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, DomainError>;
}
