//! Authentication handlers (register, login, refresh, logout, me)

use axum::extract::State;
use axum::http::{header, HeaderName, StatusCode};
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use streamgate_auth_core::hash_password;
use streamgate_db::{CreateUser, UserRepository};
use streamgate_types::{LoginRequest, LoginResponse, RegisterRequest, Role, TokenPair, UserProfile};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AuthUser, RefreshToken, ACCESS_COOKIE, REFRESH_COOKIE};
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

// ============================================================================
// Cookie helpers
// ============================================================================

fn token_cookie(name: &str, value: &str, max_age_secs: u64) -> String {
    format!(
        "{name}={value}; HttpOnly; Secure; SameSite=Strict; Path=/; Max-Age={max_age_secs}"
    )
}

fn expired_cookie(name: &str) -> String {
    format!("{name}=; HttpOnly; Secure; SameSite=Strict; Path=/; Max-Age=0")
}

/// Both tokens travel as HttpOnly cookies, each bounded by its own lifetime.
fn session_cookies(state: &AppState, pair: &TokenPair) -> AppendHeaders<[(HeaderName, String); 2]> {
    AppendHeaders([
        (
            header::SET_COOKIE,
            token_cookie(
                ACCESS_COOKIE,
                &pair.access_token,
                state.config.auth.access_ttl.as_secs(),
            ),
        ),
        (
            header::SET_COOKIE,
            token_cookie(
                REFRESH_COOKIE,
                &pair.refresh_token,
                state.config.auth.refresh_ttl.as_secs(),
            ),
        ),
    ])
}

fn cleared_cookies() -> AppendHeaders<[(HeaderName, String); 2]> {
    AppendHeaders([
        (header::SET_COOKIE, expired_cookie(ACCESS_COOKIE)),
        (header::SET_COOKIE, expired_cookie(REFRESH_COOKIE)),
    ])
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/auth/register
///
/// Create a new user account. New accounts always get the `user` role;
/// admin accounts are provisioned out of band.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_registration(&req)?;

    let email = req.email.trim().to_ascii_lowercase();

    if state.users.find_by_email(&email).await?.is_some() {
        return Err(ApiError::Conflict(format!(
            "account already exists for {email}"
        )));
    }

    let password_hash = hash_password(&req.password)?;

    let row = state
        .users
        .create(CreateUser {
            id: Uuid::new_v4(),
            email,
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            password_hash,
            role: Role::User.to_string(),
        })
        .await?;

    tracing::info!(user_id = %row.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: row.profile(),
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Verify credentials and install a fresh session, invalidating any
/// session the account had before.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = req.email.trim().to_ascii_lowercase();

    let (profile, pair) = state.auth.login(&email, &req.password).await?;

    tracing::info!(user_id = %profile.id, "Login succeeded");

    let cookies = session_cookies(&state, &pair);
    Ok((
        StatusCode::OK,
        cookies,
        Json(LoginResponse { user: profile }),
    ))
}

/// POST /api/v1/auth/refresh
///
/// Rotate the presented refresh token for a fresh pair. A stale token
/// loses the race here and gets the same 401 as a forged one.
pub async fn refresh(
    State(state): State<AppState>,
    RefreshToken(presented): RefreshToken,
) -> ApiResult<impl IntoResponse> {
    let (profile, pair) = state.auth.refresh(&presented).await?;

    tracing::debug!(user_id = %profile.id, "Session refreshed");

    let cookies = session_cookies(&state, &pair);
    Ok((
        StatusCode::OK,
        cookies,
        Json(LoginResponse { user: profile }),
    ))
}

/// POST /api/v1/auth/logout
///
/// Revoke the caller's session. Only the authenticated caller can log
/// themselves out; the body carries no user identifier.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    state.auth.logout(auth_user.user_id).await?;

    tracing::info!(user_id = %auth_user.user_id, "Logout");

    Ok((
        StatusCode::OK,
        cleared_cookies(),
        Json(LogoutResponse { success: true }),
    ))
}

/// GET /api/v1/auth/me
///
/// Current user's profile, straight from the validated access token.
pub async fn me(auth_user: AuthUser) -> ApiResult<Json<MeResponse>> {
    Ok(Json(MeResponse {
        user: auth_user.profile(),
    }))
}

fn validate_registration(req: &RegisterRequest) -> Result<(), ApiError> {
    let email = req.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::BadRequest("valid email is required".to_string()));
    }
    if req.password.len() < 8 {
        return Err(ApiError::BadRequest(
            "password must be at least 8 characters".to_string(),
        ));
    }
    if req.first_name.trim().is_empty() || req.last_name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "first and last name are required".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegisterRequest {
        RegisterRequest {
            email: "new@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
            first_name: "New".to_string(),
            last_name: "User".to_string(),
        }
    }

    #[test]
    fn test_registration_validation_accepts_valid() {
        assert!(validate_registration(&valid_request()).is_ok());
    }

    #[test]
    fn test_registration_validation_rejects_bad_email() {
        let mut req = valid_request();
        req.email = "not-an-email".to_string();
        assert!(validate_registration(&req).is_err());
    }

    #[test]
    fn test_registration_validation_rejects_short_password() {
        let mut req = valid_request();
        req.password = "short".to_string();
        assert!(validate_registration(&req).is_err());
    }

    #[test]
    fn test_token_cookie_attributes() {
        let cookie = token_cookie(ACCESS_COOKIE, "abc", 3600);
        assert!(cookie.starts_with("access_token=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn test_expired_cookie_clears_value() {
        let cookie = expired_cookie(REFRESH_COOKIE);
        assert!(cookie.starts_with("refresh_token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
