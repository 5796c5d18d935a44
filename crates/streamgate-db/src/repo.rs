//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::UserRow;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email (the login identifier)
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>>;

    /// Create a new user. Fails with [`DbError::Duplicate`] when the email
    /// is already taken.
    ///
    /// [`DbError::Duplicate`]: crate::DbError::Duplicate
    async fn create(&self, user: CreateUser) -> DbResult<UserRow>;
}

/// Create user input
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: String,
}

/// Session store trait
///
/// Keyed by user ID; holds the single currently-valid token pair per user.
/// `compare_and_swap` is the sole revocation/replay-detection primitive and
/// must be atomic with respect to concurrent callers for the same user.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Unconditionally overwrite the stored token pair (login)
    async fn put(&self, user_id: Uuid, access_token: &str, refresh_token: &str) -> DbResult<()>;

    /// Atomically replace the pair only if the stored refresh token equals
    /// `expected_refresh`. Returns false (no mutation) otherwise, including
    /// when no record exists.
    async fn compare_and_swap(
        &self,
        user_id: Uuid,
        expected_refresh: &str,
        new_access: &str,
        new_refresh: &str,
    ) -> DbResult<bool>;

    /// Set both token fields empty (logout). Idempotent.
    async fn clear(&self, user_id: Uuid) -> DbResult<()>;

    /// Read the stored pair for diagnostics. Absent record reads as empty.
    /// Never used to authorize requests.
    async fn get(&self, user_id: Uuid) -> DbResult<(String, String)>;
}
