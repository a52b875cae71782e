use assessment_backend::catalog::Catalog;
use assessment_backend::i18n::{localize_catalog, localize_section, Language};

fn load_catalog() -> Catalog {
    Catalog::from_embedded().expect("embedded catalog parses").0
}

#[test]
fn french_resolution_never_loses_a_displayable_field() {
    let catalog = load_catalog();
    let resolved = localize_catalog(&catalog, Language::Fr);

    assert_eq!(resolved.len(), catalog.sections().len());
    for (section, base) in resolved.iter().zip(catalog.sections()) {
        assert!(!section.title.trim().is_empty());
        assert!(!section.description.trim().is_empty());
        assert!(!section.weight.trim().is_empty());
        assert!(!section.estimated_time.trim().is_empty());
        assert_eq!(section.questions.len(), base.questions.len());

        for (question, base_question) in section.questions.iter().zip(&base.questions) {
            assert_eq!(question.id, base_question.id);
            assert!(!question.text.trim().is_empty());
            // options always line up with the base list
            assert_eq!(
                question.options.as_ref().map(Vec::len),
                base_question.options.as_ref().map(Vec::len)
            );
            if base_question.description.is_some() {
                assert!(question.description.is_some());
            }
        }
    }
}

#[test]
fn english_resolution_is_the_base_catalog() {
    let catalog = load_catalog();
    let resolved = localize_catalog(&catalog, Language::En);

    for (section, base) in resolved.iter().zip(catalog.sections()) {
        assert_eq!(section.title, base.title);
        assert_eq!(section.weight, base.weight);
        for (question, base_question) in section.questions.iter().zip(&base.questions) {
            assert_eq!(question.text, base_question.text);
            assert_eq!(question.options, base_question.options);
        }
    }
}

#[test]
fn translated_question_resolves_to_french() {
    let catalog = load_catalog();
    let section = catalog.section_by_id("business-strategy").unwrap();
    let resolved = localize_section(
        section,
        catalog.translation_fr("business-strategy"),
        Language::Fr,
    );

    let question = resolved
        .questions
        .iter()
        .find(|q| q.id == "identified-problems")
        .unwrap();
    let base_question = section.question("identified-problems").unwrap();
    assert_ne!(question.text, base_question.text);
    assert!(question.text.contains("opportunités"));
}

#[test]
fn untranslated_question_falls_back_to_english() {
    let catalog = load_catalog();
    let section = catalog.section_by_id("data-maturity").unwrap();
    let resolved = localize_section(
        section,
        catalog.translation_fr("data-maturity"),
        Language::Fr,
    );

    // data-storage has no French entry (the translation tables address
    // question ids this section never had); base text must survive
    let question = resolved
        .questions
        .iter()
        .find(|q| q.id == "data-storage")
        .unwrap();
    let base_question = section.question("data-storage").unwrap();
    assert_eq!(question.text, base_question.text);

    // data-consistency does carry a French entry
    let translated = resolved
        .questions
        .iter()
        .find(|q| q.id == "data-consistency")
        .unwrap();
    assert_ne!(
        translated.text,
        section.question("data-consistency").unwrap().text
    );
}

#[test]
fn contradicting_weight_translation_is_not_applied() {
    let catalog = load_catalog();
    let section = catalog.section_by_id("data-maturity").unwrap();
    assert_eq!(section.weight, "15%");

    let resolved = localize_section(
        section,
        catalog.translation_fr("data-maturity"),
        Language::Fr,
    );
    // the translation tables claim 25%; the catalog wins
    assert_eq!(resolved.weight, "15%");
}

#[test]
fn equivalent_time_translation_is_applied() {
    let catalog = load_catalog();
    let section = catalog.section_by_id("metadata-respondent-info").unwrap();
    assert_eq!(section.estimated_time, "3-4 minutes");

    let resolved = localize_section(
        section,
        catalog.translation_fr("metadata-respondent-info"),
        Language::Fr,
    );
    // differs only by dash style, so the translated variant is kept
    assert_eq!(resolved.estimated_time, "3–4 minutes");
}

#[test]
fn oversized_option_translation_keeps_base_options() {
    let catalog = load_catalog();
    let section = catalog.section_by_id("ethics-experimentation").unwrap();
    let base_question = section.question("ai-risk-management").unwrap();
    let base_len = base_question.options.as_ref().unwrap().len();

    let resolved = localize_section(
        section,
        catalog.translation_fr("ethics-experimentation"),
        Language::Fr,
    );
    let question = resolved
        .questions
        .iter()
        .find(|q| q.id == "ai-risk-management")
        .unwrap();
    assert_eq!(question.options.as_ref().unwrap().len(), base_len);
    assert_eq!(question.options, base_question.options);
    // the text itself still translates
    assert_ne!(question.text, base_question.text);
}
