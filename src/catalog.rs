use crate::error::{Error, Result};
use crate::models::catalog::{Question, Section};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::OnceLock;

const CATALOG_JSON: &str = include_str!("../assets/catalog.json");
const FR_JSON: &str = include_str!("../assets/fr.json");

/// French variants for one section. Only fields present in the map are
/// translated; everything else falls back to the catalog value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionTranslation {
    pub title: Option<String>,
    pub description: Option<String>,
    pub detailed_description: Option<String>,
    pub weight: Option<String>,
    pub estimated_time: Option<String>,
    #[serde(default)]
    pub questions: BTreeMap<String, QuestionTranslation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionTranslation {
    pub text: Option<String>,
    pub description: Option<String>,
    pub options: Option<Vec<String>>,
    pub tooltip: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    sections: Vec<Section>,
}

#[derive(Debug, Deserialize)]
struct TranslationFile {
    sections: BTreeMap<String, SectionTranslation>,
}

/// A discrepancy between the catalog and the localization map, or within
/// the catalog itself. The catalog always wins; warnings exist so bad
/// entries get fixed in the data instead of being silently guessed around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogWarning {
    DuplicateSectionId(String),
    DuplicateQuestionId { section: String, question: String },
    UnknownTranslatedSection(String),
    UnknownTranslatedQuestion { section: String, question: String },
    WeightMismatch { section: String, catalog: String, translated: String },
    EstimatedTimeMismatch { section: String, catalog: String, translated: String },
    OptionCountMismatch { section: String, question: String, catalog: usize, translated: usize },
}

impl fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogWarning::DuplicateSectionId(id) => {
                write!(f, "duplicate section id '{}'", id)
            }
            CatalogWarning::DuplicateQuestionId { section, question } => {
                write!(f, "duplicate question id '{}' in section '{}'", question, section)
            }
            CatalogWarning::UnknownTranslatedSection(id) => {
                write!(f, "translation references unknown section '{}'", id)
            }
            CatalogWarning::UnknownTranslatedQuestion { section, question } => {
                write!(
                    f,
                    "translation references unknown question '{}' in section '{}'",
                    question, section
                )
            }
            CatalogWarning::WeightMismatch { section, catalog, translated } => {
                write!(
                    f,
                    "section '{}' weight disagrees with translation: '{}' vs '{}'",
                    section, catalog, translated
                )
            }
            CatalogWarning::EstimatedTimeMismatch { section, catalog, translated } => {
                write!(
                    f,
                    "section '{}' estimated time disagrees with translation: '{}' vs '{}'",
                    section, catalog, translated
                )
            }
            CatalogWarning::OptionCountMismatch { section, question, catalog, translated } => {
                write!(
                    f,
                    "question '{}.{}' has {} options but the translation has {}",
                    section, question, catalog, translated
                )
            }
        }
    }
}

/// Compares two display labels ignoring dash variants and whitespace runs,
/// so "5–7 minutes" and "5-7 minutes" count as the same value.
pub(crate) fn labels_equivalent(a: &str, b: &str) -> bool {
    fn normalize(s: &str) -> String {
        s.chars()
            .map(|c| match c {
                '\u{2013}' | '\u{2014}' => '-',
                other => other,
            })
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
    normalize(a) == normalize(b)
}

/// The immutable question catalog plus its French localization map.
#[derive(Debug)]
pub struct Catalog {
    sections: Vec<Section>,
    translations_fr: BTreeMap<String, SectionTranslation>,
}

impl Catalog {
    /// Parses the embedded catalog and localization map, returning the
    /// catalog together with every integrity warning found.
    pub fn from_embedded() -> Result<(Catalog, Vec<CatalogWarning>)> {
        Self::from_json(CATALOG_JSON, FR_JSON)
    }

    pub fn from_json(catalog_json: &str, fr_json: &str) -> Result<(Catalog, Vec<CatalogWarning>)> {
        let catalog_file: CatalogFile = serde_json::from_str(catalog_json)
            .map_err(|e| Error::Catalog(format!("invalid catalog data: {}", e)))?;
        let translation_file: TranslationFile = serde_json::from_str(fr_json)
            .map_err(|e| Error::Catalog(format!("invalid translation data: {}", e)))?;

        let catalog = Catalog {
            sections: catalog_file.sections,
            translations_fr: translation_file.sections,
        };
        let warnings = catalog.integrity_check();
        Ok((catalog, warnings))
    }

    fn integrity_check(&self) -> Vec<CatalogWarning> {
        let mut warnings = Vec::new();

        let mut seen_sections = HashSet::new();
        for section in &self.sections {
            if !seen_sections.insert(section.id.as_str()) {
                warnings.push(CatalogWarning::DuplicateSectionId(section.id.clone()));
            }
            let mut seen_questions = HashSet::new();
            for question in &section.questions {
                if !seen_questions.insert(question.id.as_str()) {
                    warnings.push(CatalogWarning::DuplicateQuestionId {
                        section: section.id.clone(),
                        question: question.id.clone(),
                    });
                }
            }
        }

        for (section_id, translation) in &self.translations_fr {
            let Some(section) = self.section_by_id(section_id) else {
                warnings.push(CatalogWarning::UnknownTranslatedSection(section_id.clone()));
                continue;
            };

            if let Some(weight) = &translation.weight {
                if !labels_equivalent(weight, &section.weight) {
                    warnings.push(CatalogWarning::WeightMismatch {
                        section: section_id.clone(),
                        catalog: section.weight.clone(),
                        translated: weight.clone(),
                    });
                }
            }
            if let Some(time) = &translation.estimated_time {
                if !labels_equivalent(time, &section.estimated_time) {
                    warnings.push(CatalogWarning::EstimatedTimeMismatch {
                        section: section_id.clone(),
                        catalog: section.estimated_time.clone(),
                        translated: time.clone(),
                    });
                }
            }

            for (question_id, question_translation) in &translation.questions {
                let Some(question) = section.question(question_id) else {
                    warnings.push(CatalogWarning::UnknownTranslatedQuestion {
                        section: section_id.clone(),
                        question: question_id.clone(),
                    });
                    continue;
                };
                if let Some(translated_options) = &question_translation.options {
                    let base_len = question.options.as_ref().map(Vec::len).unwrap_or(0);
                    if translated_options.len() != base_len {
                        warnings.push(CatalogWarning::OptionCountMismatch {
                            section: section_id.clone(),
                            question: question_id.clone(),
                            catalog: base_len,
                            translated: translated_options.len(),
                        });
                    }
                }
            }
        }

        warnings
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn section_by_id(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn question(&self, section_id: &str, question_id: &str) -> Option<&Question> {
        self.section_by_id(section_id)
            .and_then(|s| s.question(question_id))
    }

    pub fn total_questions(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    pub fn translation_fr(&self, section_id: &str) -> Option<&SectionTranslation> {
        self.translations_fr.get(section_id)
    }
}

static CATALOG: OnceLock<Catalog> = OnceLock::new();

/// Loads the embedded catalog into the process-wide slot, logging every
/// integrity warning. Safe to call more than once; later calls return the
/// already-loaded catalog.
pub fn init() -> Result<&'static Catalog> {
    if let Some(existing) = CATALOG.get() {
        return Ok(existing);
    }
    let (catalog, warnings) = Catalog::from_embedded()?;
    for warning in &warnings {
        tracing::warn!("catalog integrity: {}", warning);
    }
    if !warnings.is_empty() {
        tracing::warn!(
            "catalog loaded with {} integrity warning(s); catalog values take precedence",
            warnings.len()
        );
    }
    let _ = CATALOG.set(catalog);
    Ok(CATALOG.get().expect("catalog slot just initialized"))
}

pub fn get() -> &'static Catalog {
    CATALOG.get().expect("Catalog has not been initialized")
}
