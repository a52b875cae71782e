use crate::catalog::Catalog;
use crate::dto::assessment_dto::TrackedEvent;
use crate::error::Result;
use crate::form::FormState;
use crate::models::analytics_event::{AnalyticsEvent, EVENT_ASSESSMENT_COMPLETE};
use crate::models::answer::{AnswerValue, FormData};
use crate::models::submission::STATUS_SUBMITTED;
use crate::services::submission_service::SubmissionRow;
use serde::Serialize;
use sqlx::PgPool;
use std::collections::BTreeMap;

/// Aggregate view the admin dashboard charts are built from.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentAnalytics {
    pub total_submissions: usize,
    /// Percentage of submissions with status `submitted`.
    pub completion_rate: f64,
    pub average_time_spent_seconds: Option<f64>,
    /// Section id -> percentage of submissions that completed the section.
    pub section_completion_rates: BTreeMap<String, f64>,
    /// "section.question" -> answer value -> occurrences. Multiselect
    /// answers count each selected option.
    pub answer_frequencies: BTreeMap<String, BTreeMap<String, i64>>,
    /// Worst five sections by drop-off rate, descending.
    pub drop_off_points: Vec<DropOffPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DropOffPoint {
    pub section_id: String,
    pub section_title: String,
    pub drop_off_rate: f64,
}

#[derive(Clone)]
pub struct AnalyticsService {
    pool: PgPool,
}

impl AnalyticsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a batch of client funnel events for one session.
    pub async fn record_events(
        &self,
        session_id: &str,
        events: &[TrackedEvent],
    ) -> Result<usize> {
        for event in events {
            sqlx::query(
                r#"
                INSERT INTO analytics_events (session_id, event_type, section_id, question_id, metadata)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(session_id)
            .bind(&event.event_type)
            .bind(event.section_id.as_deref())
            .bind(event.question_id.as_deref())
            .bind(event.metadata.clone())
            .execute(&self.pool)
            .await?;
        }
        Ok(events.len())
    }

    pub async fn event_count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM analytics_events"#)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn fetch_events(&self) -> Result<Vec<AnalyticsEvent>> {
        let events = sqlx::query_as::<_, AnalyticsEvent>(
            r#"SELECT * FROM analytics_events ORDER BY created_at ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(events)
    }

    /// Mean of the total-time metadata carried by completion events.
    pub async fn average_completion_seconds(&self) -> Result<Option<f64>> {
        let avg: Option<f64> = sqlx::query_scalar(
            r#"
            SELECT AVG((metadata ->> 'total_time_spent_seconds')::float)
            FROM analytics_events
            WHERE event_type = $1
              AND metadata ? 'total_time_spent_seconds'
            "#,
        )
        .bind(EVENT_ASSESSMENT_COMPLETE)
        .fetch_one(&self.pool)
        .await?;
        Ok(avg)
    }
}

/// Shapes submission rows into the dashboard aggregates. Pure so the
/// whole computation is testable without a database. Rows whose blob no
/// longer parses against the catalog simply contribute nothing to the
/// per-section numbers.
pub fn compute_analytics(
    catalog: &Catalog,
    rows: &[SubmissionRow],
    average_time_spent_seconds: Option<f64>,
) -> AssessmentAnalytics {
    let total = rows.len();
    let submitted = rows.iter().filter(|r| r.status == STATUS_SUBMITTED).count();
    let completion_rate = percentage(submitted, total);

    let parsed: Vec<FormData> = rows
        .iter()
        .filter_map(|row| serde_json::from_value(row.submission_data.clone()).ok())
        .collect();

    let states: Vec<FormState> = parsed
        .iter()
        .map(|data| FormState::from_data(catalog, data.clone()))
        .collect();

    let mut section_completion_rates = BTreeMap::new();
    let mut drop_off_points = Vec::new();
    for (index, section) in catalog.sections().iter().enumerate() {
        let completed = states
            .iter()
            .filter(|state| state.first_unanswered_question(index).is_none())
            .count();
        let rate = percentage(completed, total);
        section_completion_rates.insert(section.id.clone(), rate);
        drop_off_points.push(DropOffPoint {
            section_id: section.id.clone(),
            section_title: section.title.clone(),
            drop_off_rate: 100.0 - rate,
        });
    }
    drop_off_points.sort_by(|a, b| {
        b.drop_off_rate
            .partial_cmp(&a.drop_off_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    drop_off_points.truncate(5);

    let mut answer_frequencies: BTreeMap<String, BTreeMap<String, i64>> = BTreeMap::new();
    for data in &parsed {
        for section in catalog.sections() {
            for question in &section.questions {
                let Some(value) = data.get(&section.id, &question.id) else {
                    continue;
                };
                if !value.is_answered() {
                    continue;
                }
                let key = format!("{}.{}", section.id, question.id);
                let bucket = answer_frequencies.entry(key).or_default();
                match value {
                    AnswerValue::Single(answer) => {
                        *bucket.entry(answer.clone()).or_insert(0) += 1;
                    }
                    AnswerValue::Multiple(options) => {
                        for option in options {
                            *bucket.entry(option.clone()).or_insert(0) += 1;
                        }
                    }
                }
            }
        }
    }

    AssessmentAnalytics {
        total_submissions: total,
        completion_rate,
        average_time_spent_seconds,
        section_completion_rates,
        answer_frequencies,
        drop_off_points,
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}
