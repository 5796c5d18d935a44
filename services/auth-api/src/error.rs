//! Error types for the Auth API service.
//!
//! The boundary collapses every authentication-class failure into one
//! generic 401 body so responses cannot be used to enumerate identifiers
//! or probe the token verifier; the distinct internal variant is kept for
//! logging. Infrastructure failures are distinguished as 503 because they
//! are retryable and not a security decision.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use streamgate_auth_core::AuthError;
use streamgate_db::DbError;

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Any authentication-class failure; the source stays internal
    #[error("authentication failed")]
    AuthenticationFailed(#[source] AuthError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("conflict: {0}")]
    Conflict(String),

    /// Store or credential-store infrastructure failure; retryable
    #[error("service unavailable")]
    Unavailable(#[source] AuthError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed(_) => "AUTHENTICATION_FAILED",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Conflict(_) => "CONFLICT",
            Self::Unavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        if err.is_authentication_failure() {
            Self::AuthenticationFailed(err)
        } else if matches!(err, AuthError::StoreUnavailable(_)) {
            Self::Unavailable(err)
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            // Lost races at the unique constraint are conflicts, not outages
            DbError::Duplicate => Self::Conflict("account already exists".to_string()),
            other => Self::Unavailable(AuthError::from(other)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            Self::AuthenticationFailed(source) => {
                tracing::debug!(code = source.error_code(), "Authentication failed");
            }
            Self::Unavailable(source) => {
                tracing::error!(error = %source, "Store unavailable");
            }
            Self::Internal(message) => {
                tracing::error!(error = %message, "Internal API error");
            }
            _ => {}
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failures_share_one_response_shape() {
        // Every authentication-class source must surface the same
        // status and message, leaking nothing about the sub-case.
        for source in [
            AuthError::InvalidCredentials,
            AuthError::UserNotFound,
            AuthError::MalformedToken,
            AuthError::InvalidSignature,
            AuthError::Expired,
            AuthError::SessionInvalidated,
        ] {
            let err = ApiError::from(source);
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
            assert_eq!(err.to_string(), "authentication failed");
        }
    }

    #[test]
    fn test_store_unavailable_maps_to_503() {
        let err = ApiError::from(AuthError::StoreUnavailable("timeout".to_string()));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_duplicate_insert_maps_to_conflict() {
        // A registration that loses the race at the unique constraint must
        // surface as 409, not as a store outage
        let err = ApiError::from(DbError::Duplicate);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err = ApiError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
