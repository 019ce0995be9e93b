use crate::cli::ServeArgs;
use crate::demo::{demo_documents, demo_responses, DEMO_CASE_ID};
use crate::infra::{AppState, InMemoryDocumentStore, InMemoryResponseStore};
use crate::routes::with_evidence_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use case_evidence::config::AppConfig;
use case_evidence::error::AppError;
use case_evidence::telemetry;
use case_evidence::workflows::evidence::{CaseId, EvidenceService};
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
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let registry = Arc::new(config.evidence.registry()?);
    let documents = Arc::new(InMemoryDocumentStore::default());
    let responses = Arc::new(InMemoryResponseStore::default());

    if args.seed_demo {
        let case_id = CaseId::new(DEMO_CASE_ID);
        documents.replace(&case_id, demo_documents());
        responses.replace(&case_id, demo_responses());
        info!(%case_id, "seeded demo case");
    }

    let evidence_service = Arc::new(EvidenceService::new(
        registry,
        documents,
        responses,
        config.evidence.policy(),
    ));

    let app = with_evidence_routes(evidence_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        default_visa_type = config.evidence.default_visa_type.key(),
        strict_quality_check = config.evidence.strict_quality_check,
        "case evidence service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
