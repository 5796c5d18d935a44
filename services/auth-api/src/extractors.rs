//! Axum extractors for authenticated requests

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use streamgate_types::{Role, UserId, UserProfile};

use crate::state::AppState;

/// Cookie carrying the access token between requests.
pub const ACCESS_COOKIE: &str = "access_token";

/// Cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Authenticated user extracted from a validated access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.user_id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: self.role,
        }
    }
}

impl From<UserProfile> for AuthUser {
    fn from(profile: UserProfile) -> Self {
        Self {
            user_id: profile.id,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            role: profile.role,
        }
    }
}

/// Error response for auth rejections
#[derive(Debug, Serialize)]
struct AuthErrorResponse {
    error: AuthErrorDetail,
}

#[derive(Debug, Serialize)]
struct AuthErrorDetail {
    code: &'static str,
    message: &'static str,
}

/// Auth rejection type
pub struct AuthRejection {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
}

impl AuthRejection {
    fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code: "AUTHENTICATION_FAILED",
            message: "authentication failed",
        }
    }

    fn forbidden() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            code: "FORBIDDEN",
            message: "insufficient privileges",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = AuthErrorResponse {
            error: AuthErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let app_state = AppState::from_ref(state);

            let token = extract_token(parts)?;

            // Pure signature validation; no store round trip per request.
            let profile = app_state.auth.authorize(&token).map_err(|e| {
                tracing::debug!(code = e.error_code(), "Access token rejected");
                AuthRejection::unauthorized()
            })?;

            Ok(AuthUser::from(profile))
        })
    }
}

/// Extractor that additionally requires the admin role.
///
/// Rejection here is 403, not 401: the caller proved who they are,
/// they just are not allowed in.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user = AuthUser::from_request_parts(parts, state).await?;
            if !user.is_admin() {
                tracing::debug!(user_id = %user.user_id, "Admin route denied");
                return Err(AuthRejection::forbidden());
            }
            Ok(AdminUser(user))
        })
    }
}

/// Extract token from Authorization header or access cookie
fn extract_token(parts: &Parts) -> Result<String, AuthRejection> {
    // Try Authorization header first (Bearer token)
    if let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header.to_str().map_err(|_| AuthRejection {
            status: StatusCode::BAD_REQUEST,
            code: "INVALID_HEADER",
            message: "Invalid Authorization header encoding",
        })?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.to_string());
        }
    }

    if let Some(token) = cookie_value(parts, ACCESS_COOKIE)? {
        return Ok(token);
    }

    Err(AuthRejection::unauthorized())
}

/// Read a single cookie value from the Cookie header, if present.
pub fn cookie_value(parts: &Parts, name: &str) -> Result<Option<String>, AuthRejection> {
    let Some(cookie_header) = parts.headers.get(header::COOKIE) else {
        return Ok(None);
    };

    let cookie_str = cookie_header.to_str().map_err(|_| AuthRejection {
        status: StatusCode::BAD_REQUEST,
        code: "INVALID_HEADER",
        message: "Invalid Cookie header encoding",
    })?;

    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some((key, value)) = cookie.split_once('=') {
            if key == name {
                return Ok(Some(value.to_string()));
            }
        }
    }

    Ok(None)
}

/// The refresh token exactly as presented in the `refresh_token` cookie.
/// Verification happens in the coordinator, not here.
#[derive(Debug, Clone)]
pub struct RefreshToken(pub String);

impl<S> FromRequestParts<S> for RefreshToken
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            match cookie_value(parts, REFRESH_COOKIE)? {
                Some(token) => Ok(RefreshToken(token)),
                None => Err(AuthRejection::unauthorized()),
            }
        })
    }
}
