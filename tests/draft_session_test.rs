use assessment_backend::catalog::Catalog;
use assessment_backend::form::{DraftStore, FileDraftStore, FormSession};
use assessment_backend::models::answer::AnswerValue;
use std::sync::Arc;

fn load_catalog() -> Catalog {
    Catalog::from_embedded().expect("embedded catalog parses").0
}

fn temp_store() -> (FileDraftStore, std::path::PathBuf) {
    let path = std::env::temp_dir().join(format!("assessment-draft-{}.json", uuid::Uuid::new_v4()));
    (FileDraftStore::new(&path), path)
}

#[tokio::test]
async fn draft_survives_across_sessions() {
    let catalog = load_catalog();
    let (store, path) = temp_store();
    let store = Arc::new(store);

    {
        let mut session = FormSession::new(&catalog, store.clone());
        session
            .update_answer(
                "business-strategy",
                "identified-problems",
                AnswerValue::Single("1–2 clear use-cases defined".into()),
            )
            .unwrap();
        session
            .toggle_option("financial-readiness", "applicable-legal-compliance", "GDPR")
            .unwrap();
        session.flush();
    }

    let resumed = FormSession::new(&catalog, store.clone());
    assert_eq!(resumed.progress().answered, 2);
    assert_eq!(
        resumed
            .state()
            .data()
            .get("financial-readiness", "applicable-legal-compliance"),
        Some(&AnswerValue::Multiple(vec!["GDPR".into()]))
    );

    // submission succeeded: the draft goes away
    resumed.clear_draft();
    assert!(store.restore().is_none());

    let fresh = FormSession::new(&catalog, store.clone());
    assert_eq!(fresh.progress().answered, 0);

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn save_and_restore_are_equivalent() {
    let catalog = load_catalog();
    let (store, path) = temp_store();

    let mut session = FormSession::new(&catalog, Arc::new(store));
    session
        .update_answer(
            "metadata-respondent-info",
            "email",
            AnswerValue::Single("founder@example.com".into()),
        )
        .unwrap();
    session
        .update_answer(
            "metadata-respondent-info",
            "full-name",
            AnswerValue::Single("Jordan Example".into()),
        )
        .unwrap();
    session.flush();

    let restored = FileDraftStore::new(&path).restore().expect("draft exists");
    assert_eq!(
        restored.get("metadata-respondent-info", "email"),
        Some(&AnswerValue::Single("founder@example.com".into()))
    );
    assert_eq!(
        restored.get("metadata-respondent-info", "full-name"),
        Some(&AnswerValue::Single("Jordan Example".into()))
    );

    let _ = std::fs::remove_file(path);
}
