use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use validator::Validate;

use crate::catalog;
use crate::dto::assessment_dto::{
    CatalogQuery, CatalogResponse, DraftResponse, SaveDraftRequest, SaveDraftResponse,
    SessionResponse, SubmitAssessmentRequest, SubmitAssessmentResponse, TrackEventsRequest,
    TrackEventsResponse,
};
use crate::form::FormState;
use crate::i18n::{localize_catalog, Language};
use crate::models::submission::{STATUS_INCOMPLETE, STATUS_SUBMITTED};
use crate::AppState;

/// Localized catalog for the survey client. Unknown language tags fall
/// back to English.
#[axum::debug_handler]
pub async fn get_catalog(Query(query): Query<CatalogQuery>) -> crate::error::Result<Response> {
    let language = Language::parse(query.lang.as_deref().unwrap_or("en"));
    let catalog = catalog::get();
    let sections = localize_catalog(catalog, language);

    let response = CatalogResponse {
        language: language.as_str().to_string(),
        total_sections: sections.len(),
        total_questions: catalog.total_questions(),
        sections,
    };
    Ok(Json(response).into_response())
}

#[axum::debug_handler]
pub async fn create_session(State(state): State<AppState>) -> crate::error::Result<Response> {
    let draft = state.draft_service.create_session().await?;
    tracing::info!(session = %draft.session_token, "draft session created");
    Ok(Json(SessionResponse {
        session_token: draft.session_token,
        created_at: draft.created_at,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn get_draft(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> crate::error::Result<Response> {
    let draft = state.draft_service.restore(&token).await?;
    Ok(Json(DraftResponse {
        form_data: draft.form_data,
        updated_at: draft.updated_at,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn save_draft(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(req): Json<SaveDraftRequest>,
) -> crate::error::Result<Response> {
    // Strict shape check: unknown ids or wrong value kinds never reach
    // the drafts table.
    let form_state = FormState::try_from_data(catalog::get(), req.form_data)?;
    let normalized = serde_json::to_value(form_state.data())?;

    let timestamp = state.draft_service.save(&token, normalized).await?;
    Ok(Json(SaveDraftResponse {
        saved: true,
        timestamp,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn delete_draft(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> crate::error::Result<Response> {
    state.draft_service.delete(&token).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

#[axum::debug_handler]
pub async fn submit_assessment(
    State(state): State<AppState>,
    Json(req): Json<SubmitAssessmentRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;

    let form_state = match FormState::try_from_data(catalog::get(), req.form_data) {
        Ok(form_state) => form_state,
        Err(e) => {
            tracing::warn!(user_email = %req.user_email, error = %e, "submission rejected");
            return Err(e);
        }
    };

    let progress = form_state.progress();
    let status = if form_state.is_complete() {
        STATUS_SUBMITTED
    } else {
        STATUS_INCOMPLETE
    };

    let submission_data = serde_json::to_value(form_state.data())?;
    let submission = state
        .submission_service
        .create(&req.user_email, &req.user_name, status, submission_data, None)
        .await?;

    tracing::info!(
        submission_id = %submission.id,
        status,
        answered = progress.answered,
        total = progress.total,
        "assessment submitted"
    );

    let payload = json!({
        "event": "submission_received",
        "submission_id": submission.id,
        "user_email": submission.user_email,
        "user_name": submission.user_name,
        "status": submission.status,
        "answered_questions": progress.answered,
        "total_questions": progress.total,
        "created_at": submission.created_at,
    });
    if let Err(e) = state
        .notification_service
        .enqueue_webhook("submission_received", &payload)
        .await
    {
        tracing::error!(error = ?e, "failed to enqueue submission webhook");
    }

    // The client clears its draft after a successful submit; do the same
    // for the server-held copy when the session is known.
    if let Some(session_token) = &req.session_token {
        if let Err(e) = state.draft_service.delete(session_token).await {
            tracing::warn!(error = ?e, "failed to clear draft after submission");
        }
    }

    let response = SubmitAssessmentResponse {
        submission_id: submission.id,
        status: submission.status.clone(),
        message: "Assessment submitted successfully.".to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[axum::debug_handler]
pub async fn track_events(
    State(state): State<AppState>,
    Json(req): Json<TrackEventsRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let recorded = state
        .analytics_service
        .record_events(&req.session_id, &req.events)
        .await?;
    Ok(Json(TrackEventsResponse { recorded }).into_response())
}
