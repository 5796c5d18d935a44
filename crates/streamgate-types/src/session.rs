//! Session and token types

use serde::{Deserialize, Serialize};

use crate::UserId;

/// Token pair returned after login or refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access token (short-lived)
    pub access_token: String,
    /// Refresh token (long-lived, single-use)
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: u64,
    /// Token type (always "Bearer")
    pub token_type: String,
}

impl TokenPair {
    /// Build a bearer pair with the given access lifetime
    pub fn bearer(access_token: String, refresh_token: String, expires_in: u64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
            token_type: "Bearer".to_string(),
        }
    }
}

/// Server-side session record for one user.
///
/// A user holds at most one active session: issuing a new pair always fully
/// replaces the prior one. Both fields empty means fully logged out, and an
/// absent record is equivalent to empty for validation purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// User who owns the session
    pub user_id: UserId,
    /// The exact access token string last issued
    pub access_token: String,
    /// The exact refresh token string last issued
    pub refresh_token: String,
}

impl SessionRecord {
    /// Check whether the record marks the user as logged out
    pub fn is_cleared(&self) -> bool {
        self.access_token.is_empty() && self.refresh_token.is_empty()
    }
}
