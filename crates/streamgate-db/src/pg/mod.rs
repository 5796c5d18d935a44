//! PostgreSQL repository implementations
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE users (
//!     id             UUID PRIMARY KEY,
//!     email          TEXT NOT NULL UNIQUE,
//!     first_name     TEXT NOT NULL,
//!     last_name      TEXT NOT NULL,
//!     password_hash  TEXT NOT NULL,
//!     role           TEXT NOT NULL DEFAULT 'user',
//!     created_at     TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at     TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//!
//! CREATE TABLE sessions (
//!     user_id        UUID PRIMARY KEY REFERENCES users(id),
//!     access_token   TEXT NOT NULL DEFAULT '',
//!     refresh_token  TEXT NOT NULL DEFAULT '',
//!     updated_at     TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

mod session;
mod user;

pub use session::PgSessionStore;
pub use user::PgUserRepository;
