use crate::catalog::{labels_equivalent, Catalog, QuestionTranslation, SectionTranslation};
use crate::form::input::InputWidget;
use crate::models::catalog::{Question, QuestionType, Section};
use serde::{Deserialize, Serialize};

/// Supported display languages. English is the base language every
/// translated field falls back to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }

    /// Parses a language tag, case-insensitively and tolerant of region
    /// suffixes ("fr-CA" resolves to French). Unknown tags fall back to
    /// English rather than failing.
    pub fn parse(tag: &str) -> Language {
        let normalized = tag.trim().to_ascii_lowercase();
        match normalized.split(['-', '_']).next().unwrap_or("") {
            "fr" => Language::Fr,
            _ => Language::En,
        }
    }
}

/// A question with every displayable field resolved for one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedQuestion {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub widget: InputWidget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedSection {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
    pub weight: String,
    pub estimated_time: String,
    pub questions: Vec<LocalizedQuestion>,
}

fn pick(base: &str, translated: Option<&String>) -> String {
    match translated {
        Some(t) if !t.trim().is_empty() => t.clone(),
        _ => base.to_string(),
    }
}

fn pick_opt(base: Option<&String>, translated: Option<&String>) -> Option<String> {
    match translated {
        Some(t) if !t.trim().is_empty() => Some(t.clone()),
        _ => base.cloned(),
    }
}

/// Resolves one question for a language. Absence of a translation is a
/// silent fallback; a base value is never lost. A translated options list
/// is only used when its length matches the base list, so displayed
/// choices always line up with stored answer values.
pub fn localize_question(
    question: &Question,
    translation: Option<&QuestionTranslation>,
    language: Language,
) -> LocalizedQuestion {
    let translation = match language {
        Language::En => None,
        Language::Fr => translation,
    };

    let options = match (&question.options, translation.and_then(|t| t.options.as_ref())) {
        (Some(base), Some(translated)) if translated.len() == base.len() => {
            Some(translated.clone())
        }
        (base, _) => base.clone(),
    };

    LocalizedQuestion {
        id: question.id.clone(),
        text: pick(&question.text, translation.and_then(|t| t.text.as_ref())),
        description: pick_opt(
            question.description.as_ref(),
            translation.and_then(|t| t.description.as_ref()),
        ),
        question_type: question.question_type,
        widget: InputWidget::for_type(question.question_type),
        options,
        required: question.required,
        tooltip: pick_opt(
            question.tooltip.as_ref(),
            translation.and_then(|t| t.tooltip.as_ref()),
        ),
    }
}

/// Resolves one section for a language. Weight and estimated time are
/// catalog data, not free text: a translated variant is applied only when
/// it agrees with the catalog value (modulo dash/whitespace differences);
/// contradicting variants were already flagged at load time and the
/// catalog value is kept.
pub fn localize_section(
    section: &Section,
    translation: Option<&SectionTranslation>,
    language: Language,
) -> LocalizedSection {
    let translation = match language {
        Language::En => None,
        Language::Fr => translation,
    };

    let weight = match translation.and_then(|t| t.weight.as_ref()) {
        Some(w) if labels_equivalent(w, &section.weight) => w.clone(),
        _ => section.weight.clone(),
    };
    let estimated_time = match translation.and_then(|t| t.estimated_time.as_ref()) {
        Some(t) if labels_equivalent(t, &section.estimated_time) => t.clone(),
        _ => section.estimated_time.clone(),
    };

    let questions = section
        .questions
        .iter()
        .map(|q| {
            localize_question(
                q,
                translation.and_then(|t| t.questions.get(&q.id)),
                language,
            )
        })
        .collect();

    LocalizedSection {
        id: section.id.clone(),
        title: pick(&section.title, translation.and_then(|t| t.title.as_ref())),
        description: pick(
            &section.description,
            translation.and_then(|t| t.description.as_ref()),
        ),
        detailed_description: pick_opt(
            section.detailed_description.as_ref(),
            translation.and_then(|t| t.detailed_description.as_ref()),
        ),
        weight,
        estimated_time,
        questions,
    }
}

/// Resolves the whole catalog for a language, in declared section order.
pub fn localize_catalog(catalog: &Catalog, language: Language) -> Vec<LocalizedSection> {
    catalog
        .sections()
        .iter()
        .map(|section| localize_section(section, catalog.translation_fr(&section.id), language))
        .collect()
}
