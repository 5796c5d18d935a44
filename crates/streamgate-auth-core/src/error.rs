//! Auth errors

use thiserror::Error;

/// Authentication errors
///
/// The authentication-class variants stay distinct internally for logging
/// and diagnostics; the transport boundary collapses them into a single
/// "authentication failed" response so callers cannot enumerate identifiers
/// or probe the token verifier.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Wrong password for a known user (login only)
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No user record for the presented identifier (login only)
    #[error("user not found")]
    UserNotFound,

    /// Token cannot be parsed at all
    #[error("malformed token")]
    MalformedToken,

    /// Token signature does not verify under the expected class secret
    #[error("invalid signature")]
    InvalidSignature,

    /// Token is past its expiry instant
    #[error("token expired")]
    Expired,

    /// Refresh token is cryptographically valid but stale: a prior rotation
    /// superseded it, or the user logged out
    #[error("session invalidated")]
    SessionInvalidated,

    /// Session or credential store unreachable or over deadline; callers
    /// must fail closed
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Internal error (hashing failure, etc)
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Whether this is an authentication-class failure that the transport
    /// boundary must collapse into a generic 401.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials
                | Self::UserNotFound
                | Self::MalformedToken
                | Self::InvalidSignature
                | Self::Expired
                | Self::SessionInvalidated
        )
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            _ if self.is_authentication_failure() => 401,
            Self::StoreUnavailable(_) => 503,
            _ => 500,
        }
    }

    /// Get error code for internal logging
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::Expired => "EXPIRED",
            Self::SessionInvalidated => "SESSION_INVALIDATED",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<streamgate_db::DbError> for AuthError {
    fn from(err: streamgate_db::DbError) -> Self {
        tracing::error!("Database error: {}", err);
        Self::StoreUnavailable(err.to_string())
    }
}
