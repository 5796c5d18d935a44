//! Application state

use std::ops::Deref;
use std::sync::Arc;

use streamgate_auth_core::SessionCoordinator;
use streamgate_db::{DbPool, PgSessionStore, PgUserRepository};

use crate::config::Config;

/// Type alias for the coordinator with concrete repository types
pub type Coordinator = SessionCoordinator<PgUserRepository, PgSessionStore>;

/// Shared database pool wrapper for health checks
#[derive(Clone)]
pub struct SharedPool(Arc<DbPool>);

impl Deref for SharedPool {
    type Target = DbPool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Session coordinator: login, refresh, logout, authorize
    pub auth: Arc<Coordinator>,
    /// User repository (registration)
    pub users: Arc<PgUserRepository>,
    /// Database connection pool (shared reference for health checks)
    pub pool: SharedPool,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config, pool: DbPool) -> Self {
        let users = Arc::new(PgUserRepository::new(pool.clone()));
        let store = Arc::new(PgSessionStore::new(pool.clone()));
        let auth = Arc::new(Coordinator::new(&config.auth, Arc::clone(&users), store));

        Self {
            auth,
            users,
            pool: SharedPool(Arc::new(pool)),
            config: Arc::new(config),
        }
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}
