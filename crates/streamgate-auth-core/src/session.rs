//! Session coordinator: login, refresh rotation, and logout
//!
//! Owns the rotation/replay-detection algorithm. Every successful refresh
//! replaces the stored pair through the store's compare-and-swap, which
//! turns each refresh token into a single-use credential without any
//! separate denylist.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use streamgate_db::{DbResult, SessionStore, UserRepository};
use streamgate_types::{SessionRecord, TokenPair, UserId, UserProfile};

use crate::credentials::verify_password;
use crate::token::{TokenClass, TokenCodec};
use crate::{AuthConfig, AuthError};

/// Per-user session state machine: LoggedOut -> Active -> Active' -> LoggedOut.
///
/// No expired state is persisted; expiry is detected lazily by the token
/// codec at verification time. Dependencies are constructor-injected, so
/// there is no global store handle or order-of-initialization hazard.
pub struct SessionCoordinator<U: UserRepository, S: SessionStore> {
    users: Arc<U>,
    store: Arc<S>,
    codec: TokenCodec,
    store_deadline: Duration,
}

impl<U: UserRepository, S: SessionStore> SessionCoordinator<U, S> {
    /// Create a new coordinator
    pub fn new(config: &AuthConfig, users: Arc<U>, store: Arc<S>) -> Self {
        Self {
            users,
            store,
            codec: TokenCodec::new(config),
            store_deadline: config.store_deadline,
        }
    }

    /// Access the underlying codec (used by the authorization gate)
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Authenticate credentials and issue a fresh token pair.
    ///
    /// The store write is unconditional: a second concurrent login simply
    /// wins the race and invalidates the first pair (single session per
    /// user). `UserNotFound` and `InvalidCredentials` stay distinct here;
    /// the transport boundary collapses them.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(UserProfile, TokenPair), AuthError> {
        let user = self
            .bounded(self.users.find_by_email(email))
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password(password, &user.password_hash) {
            tracing::debug!(user_id = %user.user_id(), "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let profile = user.profile();
        let pair = self.codec.issue_pair(&profile)?;

        self.bounded(
            self.store
                .put(profile.id.0, &pair.access_token, &pair.refresh_token),
        )
        .await?;

        tracing::info!(user_id = %profile.id, "Session issued");
        Ok((profile, pair))
    }

    /// Rotate a session: exchange a refresh token for a fresh pair.
    ///
    /// The codec is consulted first, so a malformed, forged, or expired
    /// token never touches the store. A cryptographically valid token that
    /// fails the compare-and-swap is stale (already rotated or logged out)
    /// and can never be used again.
    pub async fn refresh(&self, presented: &str) -> Result<(UserProfile, TokenPair), AuthError> {
        let claims = self.codec.verify(TokenClass::Refresh, presented)?;
        let profile = claims.profile()?;
        let pair = self.codec.issue_pair(&profile)?;

        let swapped = self
            .bounded(self.store.compare_and_swap(
                profile.id.0,
                presented,
                &pair.access_token,
                &pair.refresh_token,
            ))
            .await?;

        if !swapped {
            tracing::debug!(user_id = %profile.id, "Stale refresh token presented");
            return Err(AuthError::SessionInvalidated);
        }

        Ok((profile, pair))
    }

    /// Clear the user's session. Idempotent: clearing an already-empty
    /// record is not an error.
    pub async fn logout(&self, user_id: UserId) -> Result<(), AuthError> {
        self.bounded(self.store.clear(user_id.0)).await?;
        tracing::info!(user_id = %user_id, "Session cleared");
        Ok(())
    }

    /// Authorization gate entry point: verify an access token and extract
    /// the identity it carries. Pure codec work, no store round trip, so
    /// validation never blocks on the store.
    pub fn authorize(&self, access_token: &str) -> Result<UserProfile, AuthError> {
        self.codec
            .verify(TokenClass::Access, access_token)?
            .profile()
    }

    /// Read the stored session record for diagnostics. Not used to
    /// authorize requests.
    pub async fn session_snapshot(&self, user_id: UserId) -> Result<SessionRecord, AuthError> {
        let (access_token, refresh_token) = self.bounded(self.store.get(user_id.0)).await?;

        Ok(SessionRecord {
            user_id,
            access_token,
            refresh_token,
        })
    }

    /// Bound a store call by the configured deadline. Deadline expiry fails
    /// closed as `StoreUnavailable`, never as a stale success.
    async fn bounded<T>(
        &self,
        fut: impl Future<Output = DbResult<T>>,
    ) -> Result<T, AuthError> {
        match tokio::time::timeout(self.store_deadline, fut).await {
            Ok(result) => result.map_err(AuthError::from),
            Err(_) => Err(AuthError::StoreUnavailable(format!(
                "store call exceeded {:?} deadline",
                self.store_deadline
            ))),
        }
    }
}

impl<U: UserRepository, S: SessionStore> std::fmt::Debug for SessionCoordinator<U, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCoordinator")
            .field("store_deadline", &self.store_deadline)
            .finish_non_exhaustive()
    }
}
