//! HTTP request handlers

pub mod admin;
pub mod auth;
pub mod health;

pub use admin::session_status;
pub use auth::{login, logout, me, refresh, register};
pub use health::{health, live, ready};
