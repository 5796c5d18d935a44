//! Credential verification
//!
//! Wraps the argon2 password-digest primitive. Hashing salts with OS
//! randomness; verification delegates mismatch timing to the PHC
//! implementation. Plaintext passwords are never logged.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

use crate::AuthError;

/// Hash a plaintext password into a PHC-format digest
pub fn hash_password(plaintext: &str) -> Result<String, AuthError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes)
        .map_err(|e| AuthError::Internal(format!("salt generation failed: {e}")))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AuthError::Internal(format!("salt encoding failed: {e}")))?;

    let digest = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| AuthError::Internal(format!("password hashing failed: {e}")))?;

    Ok(digest.to_string())
}

/// Verify a plaintext password against a stored digest.
///
/// Pure function of its inputs. An unparseable digest verifies false
/// rather than erroring, so a corrupt stored digest fails closed.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let digest = hash_password("correct-horse-battery").unwrap();
        assert!(verify_password("correct-horse-battery", &digest));
        assert!(!verify_password("wrong-password", &digest));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_digest_fails_closed() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }
}
