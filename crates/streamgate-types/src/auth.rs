//! Auth request/response payloads

use serde::{Deserialize, Serialize};

use crate::UserProfile;

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Email address (login identifier)
    pub email: String,
    /// Plaintext password (hashed before storage, never logged)
    pub password: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// Login response body
///
/// The token pair itself travels in HttpOnly cookies; the body carries the
/// profile for the client UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Authenticated user's profile
    pub user: UserProfile,
}
