use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_SUBMITTED: &str = "submitted";
pub const STATUS_INCOMPLETE: &str = "incomplete";

/// A finalized assessment as stored. `submission_data` is the nested
/// section -> question -> answer object; ids in it are catalog ids, which
/// keeps admin aggregation queries stable.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Submission {
    pub id: Uuid,
    pub user_email: String,
    pub user_name: String,
    pub status: String,
    pub submission_data: JsonValue,
    pub organization_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
