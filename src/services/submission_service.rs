use crate::error::Result;
use crate::models::submission::Submission;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct SubmissionFilter {
    /// Matches email, name or id, case-insensitively.
    pub search: Option<String>,
    pub status: Option<String>,
    /// Matches the company-name answer inside the submission data.
    pub organization: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct SubmissionService {
    pool: PgPool,
}

impl SubmissionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_email: &str,
        user_name: &str,
        status: &str,
        submission_data: JsonValue,
        organization_id: Option<Uuid>,
    ) -> Result<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (user_email, user_name, status, submission_data, organization_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(user_email)
        .bind(user_name)
        .bind(status)
        .bind(submission_data)
        .bind(organization_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(submission)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Submission> {
        let submission =
            sqlx::query_as::<_, Submission>(r#"SELECT * FROM submissions WHERE id = $1"#)
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(submission)
    }

    pub async fn list(
        &self,
        filter: &SubmissionFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Submission>, i64)> {
        let offset = (page - 1) * limit;
        let search = filter.search.as_ref().map(|s| format!("%{}%", s));
        let organization = filter.organization.as_ref().map(|s| format!("%{}%", s));

        let rows = sqlx::query_as::<_, Submission>(
            r#"
            SELECT * FROM submissions
            WHERE ($1::text IS NULL OR user_email ILIKE $1 OR user_name ILIKE $1 OR id::text ILIKE $1)
              AND ($2::text IS NULL OR status = $2)
              AND ($3::text IS NULL OR submission_data #>> '{metadata-respondent-info,company-name}' ILIKE $3)
              AND ($4::timestamptz IS NULL OR created_at >= $4)
              AND ($5::timestamptz IS NULL OR created_at <= $5)
            ORDER BY created_at DESC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(search.clone())
        .bind(filter.status.clone())
        .bind(organization.clone())
        .bind(filter.from)
        .bind(filter.to)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM submissions
            WHERE ($1::text IS NULL OR user_email ILIKE $1 OR user_name ILIKE $1 OR id::text ILIKE $1)
              AND ($2::text IS NULL OR status = $2)
              AND ($3::text IS NULL OR submission_data #>> '{metadata-respondent-info,company-name}' ILIKE $3)
              AND ($4::timestamptz IS NULL OR created_at >= $4)
              AND ($5::timestamptz IS NULL OR created_at <= $5)
            "#,
        )
        .bind(search)
        .bind(filter.status.clone())
        .bind(organization)
        .bind(filter.from)
        .bind(filter.to)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows, total))
    }

    /// Deletes every submission in the id set. Returns the number removed.
    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(r#"DELETE FROM submissions WHERE id = ANY($1)"#)
            .bind(ids)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn status_counts(&self) -> Result<HashMap<String, i64>> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as(r#"SELECT status, COUNT(*) FROM submissions GROUP BY status"#)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().collect())
    }

    /// Most recent create/update instant, used by the admin change poll.
    pub async fn latest_change(&self) -> Result<Option<DateTime<Utc>>> {
        let latest: Option<DateTime<Utc>> =
            sqlx::query_scalar(r#"SELECT MAX(updated_at) FROM submissions"#)
                .fetch_one(&self.pool)
                .await?;
        Ok(latest)
    }

    pub async fn changed_since(&self, since: DateTime<Utc>) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM submissions WHERE updated_at > $1"#)
                .bind(since)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Status plus raw answer blob for every submission, the input of the
    /// aggregate analytics computation.
    pub async fn fetch_for_analytics(&self) -> Result<Vec<SubmissionRow>> {
        let rows = sqlx::query_as::<_, SubmissionRow>(
            r#"SELECT status, submission_data FROM submissions"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubmissionRow {
    pub status: String,
    pub submission_data: JsonValue,
}
