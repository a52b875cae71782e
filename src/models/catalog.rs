use serde::{Deserialize, Serialize};

/// Declared input kind of a question. Drives both answer-shape validation
/// and the widget a client should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Radio,
    Multiselect,
    Dropdown,
    Text,
    Textarea,
}

impl QuestionType {
    pub fn is_multi(self) -> bool {
        matches!(self, QuestionType::Multiselect)
    }
}

/// A single catalog question. Base-language (English) text only; the
/// French variants live in the localization map and are merged by the
/// resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

/// An ordered group of questions. Order is significant: it drives
/// navigation, progress and first-unanswered lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
    pub weight: String,
    pub estimated_time: String,
    pub questions: Vec<Question>,
}

impl Section {
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}
