//! Mock repositories for testing

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use streamgate_auth_core::hash_password;
use streamgate_db::{CreateUser, DbError, DbResult, SessionStore, UserRepository, UserRow};

/// In-memory user repository for testing
#[derive(Default, Clone)]
pub struct MockUserRepository {
    users: Arc<DashMap<Uuid, UserRow>>,
    by_email: Arc<DashMap<String, Uuid>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test user directly
    pub fn insert_user(&self, user: UserRow) {
        self.by_email.insert(user.email.clone(), user.id);
        self.users.insert(user.id, user);
    }

    /// Create and insert a test user with a real argon2 digest
    pub fn insert_test_user(&self, email: &str, password: &str, role: &str) -> UserRow {
        let row = UserRow {
            id: Uuid::new_v4(),
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password_hash: hash_password(password).expect("test password hashes"),
            role: role.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.insert_user(row.clone());
        row
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .by_email
            .get(email)
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        if self.by_email.contains_key(&user.email) {
            return Err(DbError::Duplicate);
        }
        let row = UserRow {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.insert_user(row.clone());
        Ok(row)
    }
}

/// In-memory session store for testing.
///
/// The compare-and-swap runs under the DashMap entry lock, so it is atomic
/// per user exactly like the single-statement UPDATE in Postgres. Counts
/// mutations so tests can assert the store was never touched.
#[derive(Default, Clone)]
pub struct MockSessionStore {
    sessions: Arc<DashMap<Uuid, (String, String)>>,
    cas_calls: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl MockSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of compare-and-swap attempts so far
    pub fn cas_calls(&self) -> usize {
        self.cas_calls.load(Ordering::SeqCst)
    }

    /// Number of writes (put/clear/successful CAS) so far
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn put(&self, user_id: Uuid, access_token: &str, refresh_token: &str) -> DbResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.sessions
            .insert(user_id, (access_token.to_string(), refresh_token.to_string()));
        Ok(())
    }

    async fn compare_and_swap(
        &self,
        user_id: Uuid,
        expected_refresh: &str,
        new_access: &str,
        new_refresh: &str,
    ) -> DbResult<bool> {
        self.cas_calls.fetch_add(1, Ordering::SeqCst);

        // Entry holds the shard write lock across the check and the swap
        match self.sessions.entry(user_id) {
            Entry::Occupied(mut entry) => {
                if entry.get().1 == expected_refresh {
                    entry.insert((new_access.to_string(), new_refresh.to_string()));
                    self.writes.fetch_add(1, Ordering::SeqCst);
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Entry::Vacant(_) => Ok(false),
        }
    }

    async fn clear(&self, user_id: Uuid) -> DbResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.sessions
            .insert(user_id, (String::new(), String::new()));
        Ok(())
    }

    async fn get(&self, user_id: Uuid) -> DbResult<(String, String)> {
        Ok(self
            .sessions
            .get(&user_id)
            .map(|r| r.value().clone())
            .unwrap_or_default())
    }
}
