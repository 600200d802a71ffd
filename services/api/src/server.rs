use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryApplicationRepository, InMemoryJobRepository, InMemoryStatsMirror,
};
use crate::routes::{with_app_routes, AdminStatsContext};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use jobboard::admin::OperatorGate;
use jobboard::applications::ApplicationService;
use jobboard::catalog::JobCatalog;
use jobboard::config::AppConfig;
use jobboard::error::AppError;
use jobboard::notify::TelegramNotifier;
use jobboard::stats::StatsMirror;
use jobboard::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let jobs = Arc::new(InMemoryJobRepository::default());
    let applications = Arc::new(InMemoryApplicationRepository::default());
    let mirror = Arc::new(InMemoryStatsMirror::default());
    let notifier = Arc::new(
        TelegramNotifier::from_config(config.notifier.clone())
            .map_err(|err| AppError::Io(std::io::Error::other(err.to_string())))?,
    );
    if !config.notifier.is_configured() {
        info!("telegram notifier not configured, admin notifications disabled");
    }

    let catalog = Arc::new(JobCatalog::new(jobs.clone()));
    let application_service = Arc::new(ApplicationService::new(
        jobs,
        applications,
        mirror.clone(),
        notifier,
    ));
    let admin = AdminStatsContext {
        gate: OperatorGate::from_config(&config.admin),
        mirror: mirror as Arc<dyn StatsMirror>,
    };

    let app = with_app_routes(application_service, catalog, admin)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job board api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
