use std::sync::Arc;

use sqlx::Pool;
use todo_core::repositories::{TaskStore, UserRepository};
use todo_core::services::{AuthService, SessionAuthenticator, TaskService, UnitOfWork};
use todo_security::JwtService;
use todo_shared::config::SessionSettings;

/// Shared handler state, generic over the storage backend.
pub struct AppState<S: TaskStore> {
    pub uow: UnitOfWork<S::Db>,
    pub tasks: TaskService<S>,
    pub auth: Arc<AuthService>,
    pub authenticator: Arc<SessionAuthenticator>,
    pub session: Arc<SessionSettings>,
}

impl<S: TaskStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            uow: self.uow.clone(),
            tasks: self.tasks.clone(),
            auth: Arc::clone(&self.auth),
            authenticator: Arc::clone(&self.authenticator),
            session: Arc::clone(&self.session),
        }
    }
}

impl<S: TaskStore> AppState<S> {
    pub fn new(
        pool: Pool<S::Db>,
        store: S,
        users: Arc<dyn UserRepository>,
        session: SessionSettings,
    ) -> Self {
        let tokens = Arc::new(JwtService::new(&session.secret, session.ttl_seconds));

        Self {
            uow: UnitOfWork::new(pool),
            tasks: TaskService::new(Arc::new(store)),
            auth: Arc::new(AuthService::new(Arc::clone(&users), Arc::clone(&tokens))),
            authenticator: Arc::new(SessionAuthenticator::new(users, tokens)),
            session: Arc::new(session),
        }
    }
}
