use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An answer to one question: a single string for radio/dropdown/text
/// inputs, an ordered list for multiselect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multiple(Vec<String>),
}

impl AnswerValue {
    /// "Non-empty" per the completion invariant: a trimmed-non-empty
    /// string, or a non-empty selection set.
    pub fn is_answered(&self) -> bool {
        match self {
            AnswerValue::Single(s) => !s.trim().is_empty(),
            AnswerValue::Multiple(items) => !items.is_empty(),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Single(value.to_string())
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(values: Vec<String>) -> Self {
        AnswerValue::Multiple(values)
    }
}

/// Nested answers keyed section id -> question id. Serializes to the same
/// object shape the submission record stores in `submission_data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(pub BTreeMap<String, BTreeMap<String, AnswerValue>>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, section_id: &str, question_id: &str) -> Option<&AnswerValue> {
        self.0.get(section_id).and_then(|s| s.get(question_id))
    }

    pub fn set(&mut self, section_id: &str, question_id: &str, value: AnswerValue) {
        self.0
            .entry(section_id.to_string())
            .or_default()
            .insert(question_id.to_string(), value);
    }

    pub fn remove(&mut self, section_id: &str, question_id: &str) {
        if let Some(section) = self.0.get_mut(section_id) {
            section.remove(question_id);
            if section.is_empty() {
                self.0.remove(section_id);
            }
        }
    }

    pub fn is_answered(&self, section_id: &str, question_id: &str) -> bool {
        self.get(section_id, question_id)
            .map(AnswerValue::is_answered)
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
