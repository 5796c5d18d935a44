//! Streamgate Types - Shared domain types
//!
//! This crate contains domain types used across Streamgate services:
//! - User identity and roles
//! - Token pairs and session records
//! - Auth request/response payloads

pub mod auth;
pub mod session;
pub mod user;

pub use auth::*;
pub use session::*;
pub use user::*;
