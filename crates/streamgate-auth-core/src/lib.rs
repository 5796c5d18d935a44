//! Streamgate Auth Core - Authentication business logic
//!
//! Credential verification, dual-token (access + refresh) issuance, refresh
//! rotation with replay detection, and logout-driven revocation.

pub mod config;
pub mod credentials;
pub mod error;
pub mod session;
pub mod token;

pub use config::{AuthConfig, AuthConfigError};
pub use credentials::{hash_password, verify_password};
pub use error::AuthError;
pub use session::SessionCoordinator;
pub use token::{Claims, TokenClass, TokenCodec};
