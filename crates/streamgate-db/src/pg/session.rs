//! PostgreSQL session store implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::repo::SessionStore;

/// PostgreSQL session store
///
/// One row per user. The compare-and-swap is a single conditional UPDATE,
/// so atomicity for concurrent callers on the same user comes from the
/// database's row-level locking: two refreshes presenting the same stale
/// token resolve to exactly one affected row.
#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    /// Create a new session store
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn put(&self, user_id: Uuid, access_token: &str, refresh_token: &str) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (user_id, access_token, refresh_token, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET access_token = $2, refresh_token = $3, updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(access_token)
        .bind(refresh_token)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn compare_and_swap(
        &self,
        user_id: Uuid,
        expected_refresh: &str,
        new_access: &str,
        new_refresh: &str,
    ) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET access_token = $3, refresh_token = $4, updated_at = NOW()
            WHERE user_id = $1 AND refresh_token = $2
            "#,
        )
        .bind(user_id)
        .bind(expected_refresh)
        .bind(new_access)
        .bind(new_refresh)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn clear(&self, user_id: Uuid) -> DbResult<()> {
        // Upsert so clearing an absent record stays idempotent
        sqlx::query(
            r#"
            INSERT INTO sessions (user_id, access_token, refresh_token, updated_at)
            VALUES ($1, '', '', NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET access_token = '', refresh_token = '', updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, user_id: Uuid) -> DbResult<(String, String)> {
        let row: Option<(String, String)> = sqlx::query_as(
            "SELECT access_token, refresh_token FROM sessions WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.unwrap_or_default())
    }
}
