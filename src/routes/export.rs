use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::catalog;
use crate::dto::admin_dto::SubmissionListQuery;
use crate::routes::admin::filter_from_query;
use crate::services::export_service::ExportService;
use crate::AppState;

const EXPORT_LIMIT: i64 = 10_000;

/// Submission summary CSV, honoring the same filters as the listing.
pub async fn export_submissions_csv(
    State(state): State<AppState>,
    Query(query): Query<SubmissionListQuery>,
) -> crate::error::Result<impl IntoResponse> {
    let filter = filter_from_query(&query);
    let (submissions, _) = state
        .submission_service
        .list(&filter, 1, EXPORT_LIMIT)
        .await?;

    let csv = ExportService::generate_submissions_csv(&submissions);
    let filename = format!(
        "assessment-submissions_{}.csv",
        chrono::Utc::now().format("%Y%m%d")
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

/// Styled XLSX workbook of submissions.
pub async fn export_submissions_xlsx(
    State(state): State<AppState>,
    Query(query): Query<SubmissionListQuery>,
) -> crate::error::Result<impl IntoResponse> {
    let filter = filter_from_query(&query);
    let (submissions, _) = state
        .submission_service
        .list(&filter, 1, EXPORT_LIMIT)
        .await?;

    let buffer = ExportService::generate_submissions_xlsx(catalog::get(), &submissions)?;
    let filename = format!(
        "assessment-submissions_{}.xlsx",
        chrono::Utc::now().format("%Y%m%d_%H%M")
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}

/// JSON dump of the buffered analytics events.
pub async fn export_events(
    State(state): State<AppState>,
) -> crate::error::Result<impl IntoResponse> {
    let events = state.analytics_service.fetch_events().await?;
    let buffer = ExportService::generate_events_json(&events)?;
    let filename = format!(
        "assessment-analytics_{}.json",
        chrono::Utc::now().format("%Y%m%d")
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}
