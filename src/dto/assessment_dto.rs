use crate::i18n::LocalizedSection;
use crate::models::answer::FormData;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogQuery {
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    pub language: String,
    pub total_sections: usize,
    pub total_questions: usize,
    pub sections: Vec<LocalizedSection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_token: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveDraftRequest {
    pub form_data: FormData,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveDraftResponse {
    pub saved: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DraftResponse {
    pub form_data: JsonValue,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitAssessmentRequest {
    pub form_data: FormData,
    #[validate(email)]
    pub user_email: String,
    #[validate(length(min = 1, max = 200))]
    pub user_name: String,
    pub session_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitAssessmentResponse {
    pub submission_id: uuid::Uuid,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedEvent {
    pub event_type: String,
    pub section_id: Option<String>,
    pub question_id: Option<String>,
    pub metadata: Option<JsonValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TrackEventsRequest {
    #[validate(length(min = 1, max = 200))]
    pub session_id: String,
    #[validate(length(min = 1, max = 500))]
    pub events: Vec<TrackedEvent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackEventsResponse {
    pub recorded: usize,
}
