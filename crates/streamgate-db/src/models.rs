//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use streamgate_types::{Role, UserId, UserProfile};

/// User row from the database
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> UserId {
        UserId(self.id)
    }

    /// Build the identity profile embedded in issued tokens.
    ///
    /// An unrecognized role string in storage downgrades to ordinary user
    /// rather than failing the login.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.user_id(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: self.role.parse().unwrap_or(Role::User),
        }
    }
}

