use assessment_backend::catalog::{Catalog, CatalogWarning};
use assessment_backend::models::catalog::QuestionType;

#[test]
fn embedded_catalog_loads_with_expected_shape() {
    let (catalog, _warnings) = Catalog::from_embedded().expect("embedded catalog parses");

    assert_eq!(catalog.sections().len(), 8);
    assert_eq!(catalog.total_questions(), 89);

    let ids: Vec<&str> = catalog.sections().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        [
            "business-strategy",
            "financial-readiness",
            "data-maturity",
            "technical-infrastructure",
            "automation-ai-agents",
            "team-ai-literacy",
            "ethics-experimentation",
            "metadata-respondent-info",
        ]
    );

    // every option-bearing type actually carries options
    for section in catalog.sections() {
        for question in &section.questions {
            match question.question_type {
                QuestionType::Radio | QuestionType::Multiselect | QuestionType::Dropdown => {
                    assert!(
                        question.options.as_ref().is_some_and(|o| !o.is_empty()),
                        "question {}.{} has no options",
                        section.id,
                        question.id
                    );
                }
                QuestionType::Text | QuestionType::Textarea => {}
            }
        }
    }
}

#[test]
fn catalog_has_no_duplicate_ids() {
    let (_, warnings) = Catalog::from_embedded().unwrap();
    assert!(!warnings.iter().any(|w| matches!(
        w,
        CatalogWarning::DuplicateSectionId(_) | CatalogWarning::DuplicateQuestionId { .. }
    )));
}

#[test]
fn integrity_check_flags_known_translation_mismatches() {
    let (catalog, warnings) = Catalog::from_embedded().unwrap();

    // the translation tables address section ids the catalog never had
    assert!(warnings
        .contains(&CatalogWarning::UnknownTranslatedSection("automation-agents".into())));
    assert!(warnings.contains(&CatalogWarning::UnknownTranslatedSection("team-culture".into())));

    // phantom question ids inside a real section
    assert!(warnings.iter().any(|w| matches!(
        w,
        CatalogWarning::UnknownTranslatedQuestion { section, question }
            if section == "data-maturity" && question == "data-governance-policy"
    )));

    // the 25% vs 15% weight contradiction is reported, not resolved
    assert!(warnings.iter().any(|w| matches!(
        w,
        CatalogWarning::WeightMismatch { section, catalog, translated }
            if section == "data-maturity" && catalog == "15%" && translated == "25%"
    )));

    // option lists of the wrong size are reported
    assert!(warnings.iter().any(|w| matches!(
        w,
        CatalogWarning::OptionCountMismatch { section, question, .. }
            if section == "ethics-experimentation" && question == "ai-risk-management"
    )));

    // warnings never mutate the catalog
    assert_eq!(catalog.section_by_id("data-maturity").unwrap().weight, "15%");
    assert!(catalog.section_by_id("automation-agents").is_none());
}

#[test]
fn equivalent_dash_variants_are_not_flagged() {
    let (_, warnings) = Catalog::from_embedded().unwrap();
    // "3–4 minutes" vs "3-4 minutes" differs only in dash style
    assert!(!warnings.iter().any(|w| matches!(
        w,
        CatalogWarning::EstimatedTimeMismatch { section, .. }
            if section == "metadata-respondent-info"
    )));
}

#[test]
fn duplicate_ids_in_catalog_data_are_reported() {
    let catalog_json = r#"{
        "sections": [
            {
                "id": "s1", "title": "One", "description": "d",
                "weight": "50%", "estimated_time": "1 minute",
                "questions": [
                    {"id": "q1", "text": "a?", "type": "radio", "options": ["x"], "required": true},
                    {"id": "q1", "text": "b?", "type": "text", "required": false}
                ]
            },
            {
                "id": "s1", "title": "Two", "description": "d",
                "weight": "50%", "estimated_time": "1 minute",
                "questions": []
            }
        ]
    }"#;
    let fr_json = r#"{"sections": {}}"#;

    let (_, warnings) = Catalog::from_json(catalog_json, fr_json).unwrap();
    assert!(warnings.contains(&CatalogWarning::DuplicateSectionId("s1".into())));
    assert!(warnings.iter().any(|w| matches!(
        w,
        CatalogWarning::DuplicateQuestionId { section, question }
            if section == "s1" && question == "q1"
    )));
}

#[test]
fn invalid_catalog_json_is_a_catalog_error() {
    let result = Catalog::from_json("{", r#"{"sections": {}}"#);
    assert!(result.is_err());
}
