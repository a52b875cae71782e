use crate::error::Result;
use crate::models::webhook_log::WebhookLog;
use crate::utils::signature::sign_payload;
use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Outbox-based webhook notifier. Events are enqueued into
/// `webhook_logs`; a background worker drains them one at a time and
/// retries failures with capped exponential backoff. Every delivery is
/// signed with HMAC-SHA256 over the JSON body.
#[derive(Clone)]
pub struct NotificationService {
    pool: PgPool,
    client: Client,
    target_url: Option<String>,
}

impl NotificationService {
    pub fn new(pool: PgPool, target_url: Option<String>) -> Self {
        Self {
            pool,
            client: Client::new(),
            target_url,
        }
    }

    /// Queues an event for delivery. A missing target URL disables
    /// notifications; enqueue becomes a no-op.
    pub async fn enqueue_webhook(
        &self,
        event_type: &str,
        payload: &JsonValue,
    ) -> Result<Option<WebhookLog>> {
        let Some(target_url) = &self.target_url else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, WebhookLog>(
            r#"
            INSERT INTO webhook_logs (event_type, payload, target_url, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING *
            "#,
        )
        .bind(event_type)
        .bind(payload)
        .bind(target_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(Some(row))
    }

    pub async fn deliver_once(&self, log_id: Uuid) -> Result<()> {
        let log = sqlx::query_as::<_, WebhookLog>(r#"SELECT * FROM webhook_logs WHERE id = $1"#)
            .bind(log_id)
            .fetch_one(&self.pool)
            .await?;

        let body = serde_json::to_vec(&log.payload)?;
        let secret = crate::config::get_config().webhook_secret.clone();
        let signature = sign_payload(&secret, &body);

        let res = self
            .client
            .post(&log.target_url)
            .header("Content-Type", "application/json")
            .header("X-Assessment-Event", log.event_type.clone())
            .header("X-Assessment-Signature", signature)
            .body(body)
            .send()
            .await;

        match res {
            Ok(resp) => {
                let status = resp.status().as_u16() as i32;
                let body = resp.text().await.unwrap_or_default();
                sqlx::query(
                    r#"
                    UPDATE webhook_logs
                    SET http_status = $1, response_body = $2,
                        status = CASE WHEN $1 BETWEEN 200 AND 299 THEN 'success' ELSE 'pending' END,
                        attempts = attempts + 1, updated_at = NOW()
                    WHERE id = $3
                    "#,
                )
                .bind(status)
                .bind(body)
                .bind(log.id)
                .execute(&self.pool)
                .await?;
            }
            Err(err) => {
                sqlx::query(
                    r#"
                    UPDATE webhook_logs
                    SET response_body = $1, attempts = attempts + 1, updated_at = NOW()
                    WHERE id = $2
                    "#,
                )
                .bind(format!("{}", err))
                .bind(log.id)
                .execute(&self.pool)
                .await?;
            }
        }
        Ok(())
    }

    /// Claims and delivers at most one due webhook. Returns true when a
    /// row was processed, so the worker loop can idle when the queue is
    /// empty.
    pub async fn run_once(&self) -> Result<bool> {
        let row_opt = sqlx::query(
            r#"
            SELECT id FROM webhook_logs
            WHERE status = 'pending' AND (next_retry_at IS NULL OR next_retry_at <= NOW())
            ORDER BY created_at ASC
            FOR UPDATE SKIP LOCKED
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row_opt else { return Ok(false) };
        let id: Uuid = row.try_get("id")?;

        let _ = self.deliver_once(id).await;

        let row2 = sqlx::query(r#"SELECT attempts, max_attempts, status FROM webhook_logs WHERE id = $1"#)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        let attempts: i32 = row2.try_get("attempts")?;
        let max_attempts: i32 = row2.try_get("max_attempts")?;
        let status: String = row2.try_get("status")?;

        if status == "pending" {
            if attempts >= max_attempts {
                sqlx::query(r#"UPDATE webhook_logs SET status = 'failed', updated_at = NOW() WHERE id = $1"#)
                    .bind(id)
                    .execute(&self.pool)
                    .await?;
                tracing::error!(webhook_id = %id, attempts, "webhook delivery abandoned");
            } else {
                // 30s, 60s, 120s, ... capped at one hour
                let delay_secs = (30i64 << (attempts - 1).max(0)).min(3600);
                let next_retry = Utc::now() + Duration::seconds(delay_secs);
                sqlx::query(
                    r#"UPDATE webhook_logs SET next_retry_at = $1, updated_at = NOW() WHERE id = $2"#,
                )
                .bind(next_retry)
                .bind(id)
                .execute(&self.pool)
                .await?;
            }
        }

        Ok(true)
    }
}
