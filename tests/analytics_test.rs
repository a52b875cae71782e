use assessment_backend::catalog::Catalog;
use assessment_backend::services::analytics_service::compute_analytics;
use assessment_backend::services::submission_service::SubmissionRow;
use serde_json::json;

fn small_catalog() -> Catalog {
    let catalog_json = r#"{
        "sections": [
            {
                "id": "strategy", "title": "Strategy", "description": "d",
                "weight": "50%", "estimated_time": "2 minutes",
                "questions": [
                    {"id": "goal", "text": "Goal?", "type": "radio",
                     "options": ["Cost", "Revenue"], "required": true},
                    {"id": "notes", "text": "Notes", "type": "textarea", "required": false}
                ]
            },
            {
                "id": "compliance", "title": "Compliance", "description": "d",
                "weight": "50%", "estimated_time": "2 minutes",
                "questions": [
                    {"id": "frameworks", "text": "Frameworks?", "type": "multiselect",
                     "options": ["GDPR", "SOC 2", "None"], "required": true}
                ]
            }
        ]
    }"#;
    Catalog::from_json(catalog_json, r#"{"sections": {}}"#)
        .expect("test catalog parses")
        .0
}

fn row(status: &str, data: serde_json::Value) -> SubmissionRow {
    SubmissionRow {
        status: status.to_string(),
        submission_data: data,
    }
}

#[test]
fn aggregates_cover_completion_frequencies_and_drop_off() {
    let catalog = small_catalog();
    let rows = vec![
        row(
            "submitted",
            json!({
                "strategy": {"goal": "Cost"},
                "compliance": {"frameworks": ["GDPR", "SOC 2"]}
            }),
        ),
        row(
            "submitted",
            json!({
                "strategy": {"goal": "Cost"},
                "compliance": {"frameworks": ["GDPR"]}
            }),
        ),
        row(
            "incomplete",
            json!({
                "strategy": {"goal": "Revenue"}
            }),
        ),
    ];

    let analytics = compute_analytics(&catalog, &rows, Some(900.0));

    assert_eq!(analytics.total_submissions, 3);
    assert!((analytics.completion_rate - 66.666).abs() < 0.01);
    assert_eq!(analytics.average_time_spent_seconds, Some(900.0));

    // every row finished strategy; one row never reached compliance
    assert_eq!(analytics.section_completion_rates["strategy"], 100.0);
    assert!((analytics.section_completion_rates["compliance"] - 66.666).abs() < 0.01);

    // worst drop-off first
    assert_eq!(analytics.drop_off_points[0].section_id, "compliance");
    assert!(
        analytics.drop_off_points[0].drop_off_rate > analytics.drop_off_points[1].drop_off_rate
    );

    // single answers count per value, multiselect counts per option
    let goals = &analytics.answer_frequencies["strategy.goal"];
    assert_eq!(goals["Cost"], 2);
    assert_eq!(goals["Revenue"], 1);
    let frameworks = &analytics.answer_frequencies["compliance.frameworks"];
    assert_eq!(frameworks["GDPR"], 2);
    assert_eq!(frameworks["SOC 2"], 1);
    assert!(!frameworks.contains_key("None"));
}

#[test]
fn empty_input_produces_zeroed_aggregates() {
    let catalog = small_catalog();
    let analytics = compute_analytics(&catalog, &[], None);

    assert_eq!(analytics.total_submissions, 0);
    assert_eq!(analytics.completion_rate, 0.0);
    assert_eq!(analytics.average_time_spent_seconds, None);
    assert!(analytics.answer_frequencies.is_empty());
    assert_eq!(analytics.section_completion_rates["strategy"], 0.0);
    // with nobody started, every section reads as full drop-off
    assert!(analytics
        .drop_off_points
        .iter()
        .all(|p| p.drop_off_rate == 100.0));
}

#[test]
fn unparseable_blobs_are_skipped_not_fatal() {
    let catalog = small_catalog();
    let rows = vec![
        row("submitted", json!("not an object")),
        row(
            "submitted",
            json!({"strategy": {"goal": "Cost"}, "compliance": {"frameworks": ["None"]}}),
        ),
    ];

    let analytics = compute_analytics(&catalog, &rows, None);
    assert_eq!(analytics.total_submissions, 2);
    // only the parseable row contributes to section numbers
    assert_eq!(analytics.section_completion_rates["strategy"], 50.0);
    assert_eq!(analytics.answer_frequencies["strategy.goal"]["Cost"], 1);
}
