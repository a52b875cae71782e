use crate::models::submission::Submission;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub organization: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionListResponse {
    pub submissions: Vec<Submission>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteSubmissionsRequest {
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteSubmissionsResponse {
    pub deleted: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangesQuery {
    pub since: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangesResponse {
    pub changed: bool,
    pub changed_count: i64,
    pub latest_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_submissions: i64,
    pub submitted: i64,
    pub incomplete: i64,
    pub completion_rate: f64,
    pub open_drafts: i64,
    pub tracked_events: i64,
    pub submissions_by_status: HashMap<String, i64>,
}
