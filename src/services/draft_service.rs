use crate::error::Result;
use crate::models::draft::Draft;
use crate::utils::token::generate_session_token;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::PgPool;

const SESSION_TOKEN_LENGTH: usize = 32;

/// Server-side draft storage: one jsonb blob per session token. The blob
/// is opaque here; shape validation happens at the route layer against
/// the catalog.
#[derive(Clone)]
pub struct DraftService {
    pool: PgPool,
}

impl DraftService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_session(&self) -> Result<Draft> {
        let token = generate_session_token(SESSION_TOKEN_LENGTH);
        let draft = sqlx::query_as::<_, Draft>(
            r#"
            INSERT INTO drafts (session_token)
            VALUES ($1)
            RETURNING *
            "#,
        )
        .bind(&token)
        .fetch_one(&self.pool)
        .await?;
        Ok(draft)
    }

    pub async fn save(&self, session_token: &str, form_data: JsonValue) -> Result<DateTime<Utc>> {
        let updated_at: Option<DateTime<Utc>> = sqlx::query_scalar(
            r#"
            UPDATE drafts
            SET form_data = $1, updated_at = NOW()
            WHERE session_token = $2
            RETURNING updated_at
            "#,
        )
        .bind(form_data)
        .bind(session_token)
        .fetch_optional(&self.pool)
        .await?;

        updated_at.ok_or_else(|| {
            crate::error::Error::NotFound("Unknown or expired draft session".to_string())
        })
    }

    pub async fn restore(&self, session_token: &str) -> Result<Draft> {
        let draft =
            sqlx::query_as::<_, Draft>(r#"SELECT * FROM drafts WHERE session_token = $1"#)
                .bind(session_token)
                .fetch_one(&self.pool)
                .await?;
        Ok(draft)
    }

    pub async fn delete(&self, session_token: &str) -> Result<()> {
        sqlx::query(r#"DELETE FROM drafts WHERE session_token = $1"#)
            .bind(session_token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn open_count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM drafts"#)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Removes drafts idle longer than the retention window. Run
    /// periodically by the boot-spawned purge loop.
    pub async fn purge_stale(&self, retention_days: i64) -> Result<u64> {
        let result = sqlx::query(
            r#"DELETE FROM drafts WHERE updated_at < NOW() - make_interval(days => $1::int)"#,
        )
        .bind(retention_days as i32)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
