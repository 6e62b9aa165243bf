use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    ApplicationId, ApplicationStatus, ApplicationSummaryView, ApplicationUpdate, NewApplication,
    ScreeningUpdate,
};
use super::storage::KeyValueStore;
use super::workflow::ScreeningWorkflow;

/// Workflow handle shared by request handlers; the mutex keeps a single writer.
pub type SharedWorkflow<S> = Arc<Mutex<ScreeningWorkflow<S>>>;

/// Router builder exposing the screening workflow over HTTP.
pub fn screening_router<S>(workflow: SharedWorkflow<S>) -> Router
where
    S: KeyValueStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/screening/applications",
            get(list_handler::<S>).post(create_handler::<S>),
        )
        .route(
            "/api/v1/screening/applications/:application_id",
            get(detail_handler::<S>)
                .patch(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .route(
            "/api/v1/screening/applications/:application_id/screening",
            patch(screening_handler::<S>),
        )
        .route(
            "/api/v1/screening/applications/:application_id/income-verification",
            post(income_verification_handler::<S>),
        )
        .route(
            "/api/v1/screening/applications/:application_id/score",
            get(breakdown_handler::<S>).post(rescore_handler::<S>),
        )
        .route(
            "/api/v1/screening/applications/:application_id/review",
            post(review_handler::<S>),
        )
        .route(
            "/api/v1/screening/applications/:application_id/approve",
            post(approve_handler::<S>),
        )
        .route(
            "/api/v1/screening/applications/:application_id/reject",
            post(reject_handler::<S>),
        )
        .with_state(workflow)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default)]
    pub(crate) property_id: Option<String>,
    #[serde(default)]
    pub(crate) status: Option<ApplicationStatus>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApproveRequest {
    pub(crate) reviewed_by: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RejectRequest {
    pub(crate) reviewed_by: String,
    pub(crate) reason: String,
}

fn lock<S>(workflow: &SharedWorkflow<S>) -> MutexGuard<'_, ScreeningWorkflow<S>> {
    workflow.lock().unwrap_or_else(PoisonError::into_inner)
}

fn not_found(id: &ApplicationId) -> Response {
    let payload = json!({
        "error": "application not found",
        "application_id": id.0,
    });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

/// Current record as JSON, or 404 once it is gone.
fn record_response<S: KeyValueStore>(
    workflow: &ScreeningWorkflow<S>,
    id: &ApplicationId,
) -> Response {
    match workflow.get_application_by_id(id) {
        Some(application) => (StatusCode::OK, Json(application)).into_response(),
        None => not_found(id),
    }
}

pub(crate) async fn create_handler<S: KeyValueStore + 'static>(
    State(workflow): State<SharedWorkflow<S>>,
    Json(submission): Json<NewApplication>,
) -> Response {
    let mut workflow = lock(&workflow);
    let id = workflow.add_application(submission);
    let overall_score = workflow
        .get_application_by_id(&id)
        .map(|application| application.overall_score())
        .unwrap_or_default();

    let payload = json!({
        "id": id.0,
        "status": ApplicationStatus::Pending.label(),
        "overall_score": overall_score,
    });
    (StatusCode::CREATED, Json(payload)).into_response()
}

pub(crate) async fn list_handler<S: KeyValueStore + 'static>(
    State(workflow): State<SharedWorkflow<S>>,
    Query(query): Query<ListQuery>,
) -> Response {
    let workflow = lock(&workflow);
    let summaries: Vec<ApplicationSummaryView> = workflow
        .find_applications(query.property_id.as_deref(), query.status)
        .into_iter()
        .map(|application| application.summary())
        .collect();

    (StatusCode::OK, Json(summaries)).into_response()
}

pub(crate) async fn detail_handler<S: KeyValueStore + 'static>(
    State(workflow): State<SharedWorkflow<S>>,
    Path(application_id): Path<String>,
) -> Response {
    let id = ApplicationId(application_id);
    record_response(&lock(&workflow), &id)
}

pub(crate) async fn update_handler<S: KeyValueStore + 'static>(
    State(workflow): State<SharedWorkflow<S>>,
    Path(application_id): Path<String>,
    Json(update): Json<ApplicationUpdate>,
) -> Response {
    let id = ApplicationId(application_id);
    let mut workflow = lock(&workflow);
    if !workflow.update_application(&id, update) {
        return not_found(&id);
    }
    record_response(&workflow, &id)
}

pub(crate) async fn screening_handler<S: KeyValueStore + 'static>(
    State(workflow): State<SharedWorkflow<S>>,
    Path(application_id): Path<String>,
    Json(update): Json<ScreeningUpdate>,
) -> Response {
    let id = ApplicationId(application_id);
    let mut workflow = lock(&workflow);
    if !workflow.update_screening(&id, update) {
        return not_found(&id);
    }
    record_response(&workflow, &id)
}

pub(crate) async fn income_verification_handler<S: KeyValueStore + 'static>(
    State(workflow): State<SharedWorkflow<S>>,
    Path(application_id): Path<String>,
) -> Response {
    let id = ApplicationId(application_id);
    let mut workflow = lock(&workflow);
    if !workflow.record_income_verification(&id) {
        return not_found(&id);
    }
    record_response(&workflow, &id)
}

pub(crate) async fn breakdown_handler<S: KeyValueStore + 'static>(
    State(workflow): State<SharedWorkflow<S>>,
    Path(application_id): Path<String>,
) -> Response {
    let id = ApplicationId(application_id);
    match lock(&workflow).score_breakdown(&id) {
        Some(breakdown) => (StatusCode::OK, Json(breakdown)).into_response(),
        None => not_found(&id),
    }
}

pub(crate) async fn rescore_handler<S: KeyValueStore + 'static>(
    State(workflow): State<SharedWorkflow<S>>,
    Path(application_id): Path<String>,
) -> Response {
    let id = ApplicationId(application_id);
    match lock(&workflow).calculate_overall_score(&id) {
        Some(score) => {
            let payload = json!({ "id": id.0, "overall_score": score });
            (StatusCode::OK, Json(payload)).into_response()
        }
        None => not_found(&id),
    }
}

pub(crate) async fn review_handler<S: KeyValueStore + 'static>(
    State(workflow): State<SharedWorkflow<S>>,
    Path(application_id): Path<String>,
) -> Response {
    let id = ApplicationId(application_id);
    let mut workflow = lock(&workflow);
    if !workflow.mark_under_review(&id) {
        return not_found(&id);
    }
    record_response(&workflow, &id)
}

pub(crate) async fn approve_handler<S: KeyValueStore + 'static>(
    State(workflow): State<SharedWorkflow<S>>,
    Path(application_id): Path<String>,
    Json(request): Json<ApproveRequest>,
) -> Response {
    let id = ApplicationId(application_id);
    let mut workflow = lock(&workflow);
    if !workflow.approve_application(&id, &request.reviewed_by) {
        return not_found(&id);
    }
    record_response(&workflow, &id)
}

pub(crate) async fn reject_handler<S: KeyValueStore + 'static>(
    State(workflow): State<SharedWorkflow<S>>,
    Path(application_id): Path<String>,
    Json(request): Json<RejectRequest>,
) -> Response {
    let id = ApplicationId(application_id);
    let mut workflow = lock(&workflow);
    if !workflow.reject_application(&id, &request.reviewed_by, &request.reason) {
        return not_found(&id);
    }
    record_response(&workflow, &id)
}

pub(crate) async fn delete_handler<S: KeyValueStore + 'static>(
    State(workflow): State<SharedWorkflow<S>>,
    Path(application_id): Path<String>,
) -> Response {
    let id = ApplicationId(application_id);
    if lock(&workflow).delete_application(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found(&id)
    }
}
