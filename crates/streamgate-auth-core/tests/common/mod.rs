//! Shared test helpers

pub mod mock_repos;

use std::sync::Arc;
use std::time::Duration;

use streamgate_auth_core::{AuthConfig, SessionCoordinator};

use mock_repos::{MockSessionStore, MockUserRepository};

/// Coordinator wired to in-memory repositories
pub type TestCoordinator = SessionCoordinator<MockUserRepository, MockSessionStore>;

/// Build a coordinator over fresh in-memory stores
pub fn test_coordinator() -> (Arc<TestCoordinator>, Arc<MockUserRepository>, Arc<MockSessionStore>) {
    let config = AuthConfig::try_new("a".repeat(32), "b".repeat(32))
        .expect("test secrets are valid")
        .with_store_deadline(Duration::from_secs(5));

    let users = Arc::new(MockUserRepository::new());
    let store = Arc::new(MockSessionStore::new());
    let coordinator = Arc::new(SessionCoordinator::new(
        &config,
        Arc::clone(&users),
        Arc::clone(&store),
    ));

    (coordinator, users, store)
}
