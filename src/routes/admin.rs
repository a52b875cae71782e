use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json, Response},
};
use uuid::Uuid;

use crate::catalog;
use crate::dto::admin_dto::{
    ChangesQuery, ChangesResponse, DashboardStats, DeleteSubmissionsRequest,
    DeleteSubmissionsResponse, SubmissionListQuery, SubmissionListResponse,
};
use crate::models::submission::{STATUS_INCOMPLETE, STATUS_SUBMITTED};
use crate::services::analytics_service::compute_analytics;
use crate::services::submission_service::SubmissionFilter;
use crate::AppState;

pub(crate) fn filter_from_query(query: &SubmissionListQuery) -> SubmissionFilter {
    SubmissionFilter {
        search: query.search.clone().filter(|s| !s.is_empty()),
        status: query
            .status
            .clone()
            .filter(|s| !s.is_empty() && s != "all"),
        organization: query.organization.clone().filter(|s| !s.is_empty()),
        from: query.from,
        to: query.to,
    }
}

#[axum::debug_handler]
pub async fn list_submissions(
    State(state): State<AppState>,
    Query(query): Query<SubmissionListQuery>,
) -> crate::error::Result<Response> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let filter = filter_from_query(&query);

    let (submissions, total) = state.submission_service.list(&filter, page, limit).await?;
    Ok(Json(SubmissionListResponse {
        submissions,
        total,
        page,
        limit,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> crate::error::Result<Response> {
    let submission = state.submission_service.get_by_id(id).await?;
    Ok(Json(submission).into_response())
}

#[axum::debug_handler]
pub async fn delete_submissions(
    State(state): State<AppState>,
    Json(req): Json<DeleteSubmissionsRequest>,
) -> crate::error::Result<Response> {
    let deleted = state.submission_service.delete_many(&req.ids).await?;
    tracing::info!(deleted, "submissions deleted");
    Ok(Json(DeleteSubmissionsResponse { deleted }).into_response())
}

/// Lightweight change poll for the dashboard: clients remember the last
/// `latest_updated_at` they saw and refetch when anything moved.
#[axum::debug_handler]
pub async fn submission_changes(
    State(state): State<AppState>,
    Query(query): Query<ChangesQuery>,
) -> crate::error::Result<Response> {
    let latest = state.submission_service.latest_change().await?;
    let changed_count = match query.since {
        Some(since) => state.submission_service.changed_since(since).await?,
        None => 0,
    };
    Ok(Json(ChangesResponse {
        changed: changed_count > 0,
        changed_count,
        latest_updated_at: latest,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn dashboard_stats(State(state): State<AppState>) -> crate::error::Result<Response> {
    let by_status = state.submission_service.status_counts().await?;
    let total: i64 = by_status.values().sum();
    let submitted = by_status.get(STATUS_SUBMITTED).copied().unwrap_or(0);
    let incomplete = by_status.get(STATUS_INCOMPLETE).copied().unwrap_or(0);
    let completion_rate = if total > 0 {
        (submitted as f64 / total as f64) * 100.0
    } else {
        0.0
    };
    let open_drafts = state.draft_service.open_count().await?;
    let tracked_events = state.analytics_service.event_count().await?;

    let stats = DashboardStats {
        total_submissions: total,
        submitted,
        incomplete,
        completion_rate,
        open_drafts,
        tracked_events,
        submissions_by_status: by_status,
    };
    Ok(Json(stats).into_response())
}

#[axum::debug_handler]
pub async fn assessment_analytics(
    State(state): State<AppState>,
) -> crate::error::Result<Response> {
    let rows = state.submission_service.fetch_for_analytics().await?;
    let average_time = state.analytics_service.average_completion_seconds().await?;
    let analytics = compute_analytics(catalog::get(), &rows, average_time);
    Ok(Json(analytics).into_response())
}
