use crate::infra::AppState;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use jobboard::admin::{stats_summary, OperatorGate};
use jobboard::applications::{application_router, ApplicationRepository, ApplicationService};
use jobboard::catalog::{catalog_router, JobCatalog, JobRepository};
use jobboard::notify::AdminNotifier;
use jobboard::stats::StatsMirror;

/// Mirror handle plus the operator gate for the admin stats endpoint. The
/// gate runs in the route, before the core sees the request.
#[derive(Clone)]
pub(crate) struct AdminStatsContext {
    pub(crate) gate: OperatorGate,
    pub(crate) mirror: Arc<dyn StatsMirror>,
}

pub(crate) fn with_app_routes<J, R, M, N>(
    applications: Arc<ApplicationService<J, R, M, N>>,
    catalog: Arc<JobCatalog<J>>,
    admin: AdminStatsContext,
) -> axum::Router
where
    J: JobRepository + 'static,
    R: ApplicationRepository + 'static,
    M: StatsMirror + 'static,
    N: AdminNotifier + 'static,
{
    application_router(applications)
        .merge(catalog_router(catalog))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/admin/stats",
            axum::routing::get(admin_stats_endpoint),
        )
        .layer(Extension(admin))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Text reply with the mirror count, restricted to the configured operator.
pub(crate) async fn admin_stats_endpoint(
    Extension(admin): Extension<AdminStatsContext>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let operator = headers
        .get("x-operator-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if !admin.gate.permits(operator) {
        let payload = json!({
            "status": "error",
            "message": "operator is not allowed to query stats",
        });
        return (StatusCode::FORBIDDEN, Json(payload)).into_response();
    }

    match stats_summary(admin.mirror.as_ref()) {
        Ok(reply) => (StatusCode::OK, reply).into_response(),
        Err(error) => {
            let payload = json!({
                "status": "error",
                "message": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
