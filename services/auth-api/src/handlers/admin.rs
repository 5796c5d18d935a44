//! Admin session diagnostics

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use streamgate_types::UserId;

use crate::error::ApiResult;
use crate::extractors::AdminUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub user_id: UserId,
    /// Whether the user currently holds a live session
    pub active: bool,
}

/// GET /api/v1/admin/sessions/:user_id
///
/// Session status for support tooling. Tokens never leave the store;
/// the response only says whether a session exists.
pub async fn session_status(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<SessionStatusResponse>> {
    let user_id = UserId::from(user_id);
    let record = state.auth.session_snapshot(user_id).await?;

    tracing::debug!(admin = %admin.user_id, subject = %user_id, "Session status queried");

    Ok(Json(SessionStatusResponse {
        user_id,
        active: !record.is_cleared(),
    }))
}
