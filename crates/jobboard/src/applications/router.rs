use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationId, ApplicationStatus, ApplicationView, CandidateId, SubmissionRequest};
use super::repository::ApplicationRepository;
use super::service::{ApplicationService, ApplicationServiceError};
use crate::catalog::JobRepository;
use crate::notify::AdminNotifier;
use crate::stats::StatsMirror;

/// Router builder exposing the submission and review endpoints.
pub fn application_router<J, R, M, N>(service: Arc<ApplicationService<J, R, M, N>>) -> Router
where
    J: JobRepository + 'static,
    R: ApplicationRepository + 'static,
    M: StatsMirror + 'static,
    N: AdminNotifier + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(submit_handler::<J, R, M, N>))
        .route(
            "/api/v1/applications/:application_id",
            get(get_handler::<J, R, M, N>),
        )
        .route(
            "/api/v1/applications/:application_id/status",
            patch(status_handler::<J, R, M, N>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/applications",
            get(candidate_handler::<J, R, M, N>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusChangeRequest {
    pub(crate) status: ApplicationStatus,
}

pub(crate) async fn submit_handler<J, R, M, N>(
    State(service): State<Arc<ApplicationService<J, R, M, N>>>,
    axum::Json(request): axum::Json<SubmissionRequest>,
) -> Response
where
    J: JobRepository + 'static,
    R: ApplicationRepository + 'static,
    M: StatsMirror + 'static,
    N: AdminNotifier + 'static,
{
    match service.submit(request) {
        Ok(application) => {
            let payload = json!({
                "status": "success",
                "message": "application received",
                "application": ApplicationView::from(&application),
            });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<J, R, M, N>(
    State(service): State<Arc<ApplicationService<J, R, M, N>>>,
    Path(application_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    R: ApplicationRepository + 'static,
    M: StatsMirror + 'static,
    N: AdminNotifier + 'static,
{
    match service.get(&ApplicationId(application_id)) {
        Ok(application) => {
            (StatusCode::OK, axum::Json(ApplicationView::from(&application))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<J, R, M, N>(
    State(service): State<Arc<ApplicationService<J, R, M, N>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<StatusChangeRequest>,
) -> Response
where
    J: JobRepository + 'static,
    R: ApplicationRepository + 'static,
    M: StatsMirror + 'static,
    N: AdminNotifier + 'static,
{
    match service.update_status(&ApplicationId(application_id), request.status) {
        Ok(application) => {
            (StatusCode::OK, axum::Json(ApplicationView::from(&application))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn candidate_handler<J, R, M, N>(
    State(service): State<Arc<ApplicationService<J, R, M, N>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    R: ApplicationRepository + 'static,
    M: StatsMirror + 'static,
    N: AdminNotifier + 'static,
{
    match service.list_by_candidate(&CandidateId(candidate_id)) {
        Ok(applications) => {
            let views: Vec<ApplicationView> =
                applications.iter().map(ApplicationView::from).collect();
            (StatusCode::OK, axum::Json(json!({ "applications": views }))).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: ApplicationServiceError) -> Response {
    let status = match &error {
        ApplicationServiceError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicationServiceError::JobNotFound(_) | ApplicationServiceError::NotFound(_) => {
            StatusCode::NOT_FOUND
        }
        ApplicationServiceError::InvalidTransition { .. } => StatusCode::CONFLICT,
        ApplicationServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "status": "error",
        "message": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
