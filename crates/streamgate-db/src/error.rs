//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Insert collided with an existing record (unique constraint)
    #[error("record already exists")]
    Duplicate,
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;
