use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

pub const EVENT_ASSESSMENT_STARTED: &str = "assessment_started";
pub const EVENT_SECTION_START: &str = "section_start";
pub const EVENT_SECTION_COMPLETE: &str = "section_complete";
pub const EVENT_QUESTION_ANSWERED: &str = "question_answered";
pub const EVENT_ASSESSMENT_COMPLETE: &str = "assessment_complete";
pub const EVENT_USER_DROP_OFF: &str = "user_drop_off";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalyticsEvent {
    pub id: Uuid,
    pub session_id: String,
    pub event_type: String,
    pub section_id: Option<String>,
    pub question_id: Option<String>,
    pub metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}
