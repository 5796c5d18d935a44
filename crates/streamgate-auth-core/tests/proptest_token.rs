//! Property-based tests for token verification
//!
//! These verify:
//! - Arbitrary garbage never panics the verifier and never authenticates
//! - Issued tokens always round-trip under the matching class
//! - Any tampering with the signature segment is detected

use proptest::prelude::*;

use streamgate_auth_core::{AuthConfig, AuthError, TokenClass, TokenCodec};
use streamgate_types::{Role, UserId, UserProfile};

fn test_codec() -> TokenCodec {
    TokenCodec::new(&AuthConfig::try_new("a".repeat(32), "b".repeat(32)).unwrap())
}

fn arb_profile() -> impl Strategy<Value = UserProfile> {
    (
        any::<[u8; 16]>(),
        "[a-z0-9_.+-]+@[a-z0-9.-]+\\.[a-z]{2,4}",
        "[A-Z][a-z]{1,12}",
        "[A-Z][a-z]{1,12}",
        prop_oneof![Just(Role::User), Just(Role::Admin)],
    )
        .prop_map(|(id_bytes, email, first_name, last_name, role)| UserProfile {
            id: UserId(uuid::Uuid::from_bytes(id_bytes)),
            email,
            first_name,
            last_name,
            role,
        })
}

/// Strings that look vaguely token-shaped but are not valid tokens
fn arb_garbage_token() -> impl Strategy<Value = String> {
    prop_oneof![
        // Arbitrary printable noise
        "[ -~]{0,200}",
        // JWT-shaped but random segments
        "[A-Za-z0-9_-]{5,40}\\.[A-Za-z0-9_-]{5,40}\\.[A-Za-z0-9_-]{5,40}",
        // Wrong segment counts
        "[A-Za-z0-9_-]{10,40}",
        "[A-Za-z0-9_-]{5,20}\\.[A-Za-z0-9_-]{5,20}",
        Just(String::new()),
        Just("..".to_string()),
    ]
}

proptest! {
    /// Property: garbage input never panics and never verifies
    #[test]
    fn prop_garbage_never_authenticates(token in arb_garbage_token()) {
        let codec = test_codec();
        for class in [TokenClass::Access, TokenClass::Refresh] {
            prop_assert!(codec.verify(class, &token).is_err());
        }
    }

    /// Property: issued tokens round-trip under their own class only
    #[test]
    fn prop_issue_verify_round_trips(profile in arb_profile()) {
        let codec = test_codec();

        let access = codec.issue(TokenClass::Access, &profile).unwrap();
        let claims = codec.verify(TokenClass::Access, &access).unwrap();
        prop_assert_eq!(claims.user_id().unwrap(), profile.id);
        prop_assert_eq!(&claims.email, &profile.email);
        prop_assert_eq!(claims.role, profile.role);

        prop_assert!(matches!(
            codec.verify(TokenClass::Refresh, &access),
            Err(AuthError::InvalidSignature)
        ));
    }

    /// Property: flipping any character of the signature segment is detected
    #[test]
    fn prop_signature_tampering_detected(
        profile in arb_profile(),
        tamper_pos in 0usize..40usize,
    ) {
        let codec = test_codec();
        let token = codec.issue(TokenClass::Access, &profile).unwrap();

        let (head, signature) = token.rsplit_once('.').unwrap();
        let mut sig_bytes: Vec<u8> = signature.bytes().collect();
        let pos = tamper_pos % sig_bytes.len();
        sig_bytes[pos] = if sig_bytes[pos] == b'A' { b'B' } else { b'A' };
        let tampered_sig = String::from_utf8(sig_bytes).unwrap();

        if tampered_sig != signature {
            let tampered = format!("{head}.{tampered_sig}");
            prop_assert!(codec.verify(TokenClass::Access, &tampered).is_err());
        }
    }
}
