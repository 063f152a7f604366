use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryDocumentStore, InMemoryObjectStorage, InMemoryRealtimeStore, TracingNotifier,
};
use crate::routes::app_router;
use admissions::config::AppConfig;
use admissions::error::AppError;
use admissions::telemetry;
use admissions::workflows::documents::DocumentRouterState;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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

    let snapshots = Arc::new(InMemoryRealtimeStore::default());
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        environment: config.environment,
        ui: config.ui.clone(),
        snapshots: snapshots.clone(),
    };
    let document_state = DocumentRouterState {
        objects: Arc::new(InMemoryObjectStorage::default()),
        documents: Arc::new(InMemoryDocumentStore::default()),
        notifier: Arc::new(TracingNotifier),
    };

    let app = app_router(document_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "admissions service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
