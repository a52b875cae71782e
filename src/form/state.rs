use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::models::answer::{AnswerValue, FormData};
use crate::models::catalog::Section;
use serde::Serialize;
use std::collections::BTreeMap;

pub const REQUIRED_MESSAGE: &str = "This field is required";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionProgress {
    pub answered: usize,
    pub total: usize,
}

/// Holds per-section, per-question answers and validation errors for one
/// assessment session. Validation failures never escalate: they populate
/// the error map and gate navigation, nothing more.
#[derive(Debug)]
pub struct FormState<'a> {
    catalog: &'a Catalog,
    data: FormData,
    errors: BTreeMap<String, String>,
}

impl<'a> FormState<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            data: FormData::new(),
            errors: BTreeMap::new(),
        }
    }

    /// Restores state from a persisted blob, silently dropping entries the
    /// catalog no longer knows (a stale draft must not poison a session).
    pub fn from_data(catalog: &'a Catalog, data: FormData) -> Self {
        let mut state = Self::new(catalog);
        for (section_id, answers) in data.0 {
            for (question_id, value) in answers {
                let _ = state.update_answer(&section_id, &question_id, value);
            }
        }
        state
    }

    /// Strict variant used on the submission path: unknown ids or a value
    /// whose kind contradicts the declared question type are rejected.
    pub fn try_from_data(catalog: &'a Catalog, data: FormData) -> Result<Self> {
        let mut state = Self::new(catalog);
        for (section_id, answers) in data.0 {
            for (question_id, value) in answers {
                state.update_answer(&section_id, &question_id, value)?;
            }
        }
        Ok(state)
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn into_data(self) -> FormData {
        self.data
    }

    /// Sets or replaces an answer. An empty value clears the stored answer,
    /// returning the question to its unanswered state.
    pub fn update_answer(
        &mut self,
        section_id: &str,
        question_id: &str,
        value: AnswerValue,
    ) -> Result<()> {
        let question = self.catalog.question(section_id, question_id).ok_or_else(|| {
            Error::BadRequest(format!(
                "Unknown question '{}.{}'",
                section_id, question_id
            ))
        })?;

        let is_multi = question.question_type.is_multi();
        match (&value, is_multi) {
            (AnswerValue::Multiple(_), false) => {
                return Err(Error::BadRequest(format!(
                    "Question '{}.{}' takes a single value",
                    section_id, question_id
                )));
            }
            (AnswerValue::Single(_), true) => {
                return Err(Error::BadRequest(format!(
                    "Question '{}.{}' takes a list of selected options",
                    section_id, question_id
                )));
            }
            _ => {}
        }

        if value.is_answered() {
            self.data.set(section_id, question_id, value);
        } else {
            self.data.remove(section_id, question_id);
        }
        Ok(())
    }

    /// Toggles one option of a multiselect question. Toggling the same
    /// option twice restores the original selection.
    pub fn toggle_option(
        &mut self,
        section_id: &str,
        question_id: &str,
        option: &str,
    ) -> Result<()> {
        let question = self.catalog.question(section_id, question_id).ok_or_else(|| {
            Error::BadRequest(format!(
                "Unknown question '{}.{}'",
                section_id, question_id
            ))
        })?;
        if !question.question_type.is_multi() {
            return Err(Error::BadRequest(format!(
                "Question '{}.{}' is not a multiselect",
                section_id, question_id
            )));
        }

        let toggled =
            super::input::apply_input(question, self.data.get(section_id, question_id), option);
        if toggled.is_answered() {
            self.data.set(section_id, question_id, toggled);
        } else {
            self.data.remove(section_id, question_id);
        }
        Ok(())
    }

    /// Validates one section by index. Every error entry for the section's
    /// questions is replaced, never left stale. Returns true iff no
    /// required question is unanswered. An out-of-range index has no
    /// questions to violate and validates trivially.
    pub fn validate_section(&mut self, index: usize) -> bool {
        let Some(section) = self.catalog.section(index) else {
            return true;
        };
        let mut valid = true;
        for question in &section.questions {
            let key = format!("{}.{}", section.id, question.id);
            if question.required && !self.data.is_answered(&section.id, &question.id) {
                self.errors.insert(key, REQUIRED_MESSAGE.to_string());
                valid = false;
            } else {
                self.errors.remove(&key);
            }
        }
        valid
    }

    fn section_complete(&self, section: &Section) -> bool {
        section
            .questions
            .iter()
            .filter(|q| q.required)
            .all(|q| self.data.is_answered(&section.id, &q.id))
    }

    /// True iff every section validates. Pure: the error map is untouched.
    pub fn is_complete(&self) -> bool {
        self.catalog
            .sections()
            .iter()
            .all(|section| self.section_complete(section))
    }

    /// Answered-versus-total across the whole catalog. Optional questions
    /// count, matching the visible progress bar.
    pub fn progress(&self) -> Progress {
        let total = self.catalog.total_questions();
        let answered = self
            .catalog
            .sections()
            .iter()
            .map(|section| {
                section
                    .questions
                    .iter()
                    .filter(|q| self.data.is_answered(&section.id, &q.id))
                    .count()
            })
            .sum();
        let percentage = if total == 0 {
            0.0
        } else {
            (answered as f64 / total as f64) * 100.0
        };
        Progress {
            answered,
            total,
            percentage,
        }
    }

    pub fn section_progress(&self, index: usize) -> SectionProgress {
        let Some(section) = self.catalog.section(index) else {
            return SectionProgress {
                answered: 0,
                total: 0,
            };
        };
        let answered = section
            .questions
            .iter()
            .filter(|q| self.data.is_answered(&section.id, &q.id))
            .count();
        SectionProgress {
            answered,
            total: section.questions.len(),
        }
    }

    /// First required question of the section, in declared order, that has
    /// no answer. Drives scroll-to-error in clients.
    pub fn first_unanswered_question(&self, index: usize) -> Option<&'a str> {
        let section = self.catalog.section(index)?;
        section
            .questions
            .iter()
            .find(|q| q.required && !self.data.is_answered(&section.id, &q.id))
            .map(|q| q.id.as_str())
    }

    pub fn error(&self, section_id: &str, question_id: &str) -> Option<&str> {
        self.errors
            .get(&format!("{}.{}", section_id, question_id))
            .map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }
}
