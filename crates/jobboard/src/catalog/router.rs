use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{EmployerId, JobDraft, JobFilter, JobId, JobView};
use super::repository::JobRepository;
use super::service::{CatalogError, JobCatalog};

/// Router builder exposing the job listing endpoints.
pub fn catalog_router<J>(catalog: Arc<JobCatalog<J>>) -> Router
where
    J: JobRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs",
            get(list_handler::<J>).post(post_handler::<J>),
        )
        .route(
            "/api/v1/jobs/:job_id/deactivate",
            post(deactivate_handler::<J>),
        )
        .with_state(catalog)
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostJobRequest {
    pub(crate) employer_id: String,
    #[serde(flatten)]
    pub(crate) fields: JobDraft,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeactivateRequest {
    pub(crate) employer_id: String,
}

pub(crate) async fn list_handler<J>(
    State(catalog): State<Arc<JobCatalog<J>>>,
    Query(filter): Query<JobFilter>,
) -> Response
where
    J: JobRepository + 'static,
{
    match catalog.list_active(Some(&filter)) {
        Ok(jobs) => {
            let views: Vec<JobView> = jobs.iter().map(JobView::from).collect();
            (StatusCode::OK, axum::Json(json!({ "jobs": views }))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn post_handler<J>(
    State(catalog): State<Arc<JobCatalog<J>>>,
    axum::Json(request): axum::Json<PostJobRequest>,
) -> Response
where
    J: JobRepository + 'static,
{
    match catalog.post_job(EmployerId(request.employer_id), request.fields) {
        Ok(job) => (StatusCode::CREATED, axum::Json(JobView::from(&job))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn deactivate_handler<J>(
    State(catalog): State<Arc<JobCatalog<J>>>,
    Path(job_id): Path<String>,
    axum::Json(request): axum::Json<DeactivateRequest>,
) -> Response
where
    J: JobRepository + 'static,
{
    match catalog.deactivate(&JobId(job_id), &EmployerId(request.employer_id)) {
        Ok(job) => (StatusCode::OK, axum::Json(JobView::from(&job))).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: CatalogError) -> Response {
    let status = match &error {
        CatalogError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Forbidden { .. } => StatusCode::FORBIDDEN,
        CatalogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "status": "error",
        "message": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
