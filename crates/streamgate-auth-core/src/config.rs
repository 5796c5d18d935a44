//! Configuration types for the auth core

use std::time::Duration;

/// Auth core configuration
///
/// Access and refresh tokens are signed with independent secrets so that
/// possession of one class can never forge the other.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for access tokens (at least 32 bytes)
    pub access_secret: String,
    /// HMAC secret for refresh tokens (at least 32 bytes)
    pub refresh_secret: String,
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_ttl: Duration,
    /// Deadline applied to every session-store and credential-store call
    pub store_deadline: Duration,
}

impl AuthConfig {
    /// Minimum allowed secret length in bytes (256 bits)
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Create a new auth config with nominal lifetimes
    /// (24 h access, 7 d refresh).
    ///
    /// # Errors
    /// Returns an error if either secret is shorter than 32 bytes or the
    /// two secrets are identical.
    pub fn try_new(
        access_secret: impl Into<String>,
        refresh_secret: impl Into<String>,
    ) -> Result<Self, AuthConfigError> {
        let access_secret = access_secret.into();
        let refresh_secret = refresh_secret.into();

        for (name, secret) in [
            ("access secret", &access_secret),
            ("refresh secret", &refresh_secret),
        ] {
            if secret.len() < Self::MIN_SECRET_LENGTH {
                return Err(AuthConfigError::SecretTooShort {
                    which: name,
                    actual: secret.len(),
                    minimum: Self::MIN_SECRET_LENGTH,
                });
            }
        }

        if access_secret == refresh_secret {
            return Err(AuthConfigError::SecretsNotDistinct);
        }

        Ok(Self {
            access_secret,
            refresh_secret,
            access_ttl: Duration::from_secs(24 * 60 * 60),
            refresh_ttl: Duration::from_secs(7 * 24 * 60 * 60),
            store_deadline: Duration::from_secs(10),
        })
    }

    /// Set the access token lifetime
    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    /// Set the refresh token lifetime
    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    /// Set the store call deadline
    pub fn with_store_deadline(mut self, deadline: Duration) -> Self {
        self.store_deadline = deadline;
        self
    }
}

/// Errors that can occur when building an auth config
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthConfigError {
    #[error("{which} too short: got {actual} bytes, need at least {minimum}")]
    SecretTooShort {
        which: &'static str,
        actual: usize,
        minimum: usize,
    },

    #[error("access and refresh secrets must be distinct")]
    SecretsNotDistinct,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_rejected() {
        let result = AuthConfig::try_new("short", "b".repeat(32));
        assert!(matches!(
            result,
            Err(AuthConfigError::SecretTooShort { .. })
        ));
    }

    #[test]
    fn test_identical_secrets_rejected() {
        let secret = "a".repeat(32);
        let result = AuthConfig::try_new(secret.clone(), secret);
        assert!(matches!(result, Err(AuthConfigError::SecretsNotDistinct)));
    }

    #[test]
    fn test_nominal_lifetimes() {
        let config = AuthConfig::try_new("a".repeat(32), "b".repeat(32)).unwrap();
        assert_eq!(config.access_ttl, Duration::from_secs(86_400));
        assert_eq!(config.refresh_ttl, Duration::from_secs(604_800));
    }
}
