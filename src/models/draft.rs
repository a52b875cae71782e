use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// A server-held in-progress answer blob, addressed by session token.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Draft {
    pub session_token: String,
    pub form_data: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
