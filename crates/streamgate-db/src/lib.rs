//! Streamgate DB - Database abstractions
//!
//! SQLx-based database layer for Streamgate services.
//!
//! # Example
//!
//! ```rust,ignore
//! use streamgate_db::{create_pool, PgUserRepository, PgSessionStore};
//!
//! let pool = create_pool("postgres://localhost/streamgate").await?;
//! let users = PgUserRepository::new(pool.clone());
//! let user = users.find_by_email("user@example.com").await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::{PgSessionStore, PgUserRepository};
pub use pool::{create_pool, DbPool};
pub use repo::*;
