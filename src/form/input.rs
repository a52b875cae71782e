use crate::models::answer::AnswerValue;
use crate::models::catalog::{Question, QuestionType};
use serde::{Deserialize, Serialize};

/// The input control a client should render for a question type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputWidget {
    RadioGroup,
    CheckboxGroup,
    Select,
    TextInput,
    TextArea,
}

impl InputWidget {
    pub fn for_type(question_type: QuestionType) -> InputWidget {
        match question_type {
            QuestionType::Radio => InputWidget::RadioGroup,
            QuestionType::Multiselect => InputWidget::CheckboxGroup,
            QuestionType::Dropdown => InputWidget::Select,
            QuestionType::Text => InputWidget::TextInput,
            QuestionType::Textarea => InputWidget::TextArea,
        }
    }
}

/// Maps a raw input value onto the stored answer for a question.
///
/// Single-valued types (radio, dropdown, text, textarea) replace the
/// current answer. Multiselect treats the raw value as a toggled option:
/// present in the current set it is removed, absent it is appended, so
/// toggling the same option twice restores the original set.
pub fn apply_input(question: &Question, current: Option<&AnswerValue>, raw: &str) -> AnswerValue {
    if !question.question_type.is_multi() {
        return AnswerValue::Single(raw.to_string());
    }

    let mut selected = match current {
        Some(AnswerValue::Multiple(items)) => items.clone(),
        _ => Vec::new(),
    };
    if let Some(pos) = selected.iter().position(|option| option == raw) {
        selected.remove(pos);
    } else {
        selected.push(raw.to_string());
    }
    AnswerValue::Multiple(selected)
}
