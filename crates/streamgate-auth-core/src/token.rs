//! Token codec: dual-secret JWT signing and verification
//!
//! Access and refresh tokens are HS256 JWTs signed with independent
//! secrets. The class is a tagged enum at the codec boundary, so a
//! verifier cannot be called with the wrong class by construction; the
//! distinct secrets additionally make a cross-class token fail signature
//! verification outright.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use streamgate_types::{Role, TokenPair, UserId, UserProfile};

use crate::{AuthConfig, AuthError};

/// Token class: which secret signs it and which lifetime applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    /// Short-lived bearer credential authorizing individual requests
    Access,
    /// Longer-lived credential exchanged for a new pair; single-use
    Refresh,
}

impl std::fmt::Display for TokenClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Access => write!(f, "access"),
            Self::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims embedded in every issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Email address
    pub email: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Role
    pub role: Role,
    /// Token class this was issued as
    pub token_use: TokenClass,
    /// Unique token ID. `iat`/`exp` have second resolution, so without
    /// this two tokens issued in the same second would be byte-identical
    /// and rotation would degenerate into a no-op.
    pub jti: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Parse the subject into a user ID
    pub fn user_id(&self) -> Result<UserId, AuthError> {
        UserId::parse(&self.sub).map_err(|_| AuthError::MalformedToken)
    }

    /// Rebuild the identity profile carried in the claims
    pub fn profile(&self) -> Result<UserProfile, AuthError> {
        Ok(UserProfile {
            id: self.user_id()?,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: self.role,
        })
    }
}

/// Stateless signer/verifier for both token classes
pub struct TokenCodec {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from pre-validated config
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
        }
    }

    /// Lifetime for the given class
    pub fn ttl(&self, class: TokenClass) -> Duration {
        match class {
            TokenClass::Access => self.access_ttl,
            TokenClass::Refresh => self.refresh_ttl,
        }
    }

    /// Issue a token of the given class for a user
    pub fn issue(&self, class: TokenClass, user: &UserProfile) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
            token_use: class,
            jti: uuid::Uuid::new_v4().to_string(),
            iat: now,
            exp: now + self.ttl(class).as_secs() as i64,
        };

        let key = match class {
            TokenClass::Access => &self.access_encoding,
            TokenClass::Refresh => &self.refresh_encoding,
        };

        encode(&Header::new(Algorithm::HS256), &claims, key)
            .map_err(|e| AuthError::Internal(format!("token signing failed: {e}")))
    }

    /// Issue a fresh access/refresh pair for a user
    pub fn issue_pair(&self, user: &UserProfile) -> Result<TokenPair, AuthError> {
        let access = self.issue(TokenClass::Access, user)?;
        let refresh = self.issue(TokenClass::Refresh, user)?;

        Ok(TokenPair::bearer(access, refresh, self.access_ttl.as_secs()))
    }

    /// Verify a token against the given class's secret and the codec's own
    /// clock, returning its claims.
    pub fn verify(&self, class: TokenClass, token: &str) -> Result<Claims, AuthError> {
        let key = match class {
            TokenClass::Access => &self.access_decoding,
            TokenClass::Refresh => &self.refresh_decoding,
        };

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<Claims>(token, key, &validation).map_err(|e| {
            tracing::debug!(class = %class, error = %e, "Token verification failed");
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            }
        })?;

        // Distinct secrets already reject cross-class tokens; the embedded
        // class claim guards against a misconfigured shared secret.
        if data.claims.token_use != class {
            return Err(AuthError::InvalidSignature);
        }

        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}
