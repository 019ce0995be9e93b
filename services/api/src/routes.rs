use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use case_evidence::workflows::evidence::{
    evidence_router, DocumentStore, EvidenceService, FormResponseStore, VisaType,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VisaTypeEntry {
    pub(crate) visa_type: VisaType,
    pub(crate) label: &'static str,
}

pub(crate) fn with_evidence_routes<D, F>(service: Arc<EvidenceService<D, F>>) -> axum::Router
where
    D: DocumentStore + 'static,
    F: FormResponseStore + 'static,
{
    evidence_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/visa-types", axum::routing::get(visa_types_endpoint))
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

pub(crate) async fn visa_types_endpoint() -> Json<Vec<VisaTypeEntry>> {
    Json(
        VisaType::ordered()
            .into_iter()
            .map(|visa_type| VisaTypeEntry {
                visa_type,
                label: visa_type.label(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{demo_documents, demo_responses, DEMO_CASE_ID};
    use crate::infra::{InMemoryDocumentStore, InMemoryResponseStore};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use case_evidence::workflows::evidence::{CaseId, CatalogRegistry, ResolutionPolicy};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let documents = Arc::new(InMemoryDocumentStore::default());
        let responses = Arc::new(InMemoryResponseStore::default());
        let case_id = CaseId::new(DEMO_CASE_ID);
        documents.replace(&case_id, demo_documents());
        responses.replace(&case_id, demo_responses());

        let service = Arc::new(EvidenceService::new(
            Arc::new(CatalogRegistry::standard().expect("built-in catalogs are valid")),
            documents,
            responses,
            ResolutionPolicy::default(),
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };

        with_evidence_routes(service).layer(Extension(state))
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body = serde_json::from_slice(&bytes).expect("json body");
        (status, body)
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let (status, body) = get(app(false), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");

        let (status, body) = get(app(true), "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn health_and_visa_types_respond() {
        let (status, body) = get(app(true), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = get(app(true), "/api/v1/visa-types").await;
        assert_eq!(status, StatusCode::OK);
        let entries = body.as_array().expect("array payload");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1]["visaType"], "fiance_k1");
    }

    #[tokio::test]
    async fn seeded_case_report_is_served() {
        let uri = format!("/api/v1/cases/{DEMO_CASE_ID}/evidence?visa_type=marriage_green_card");
        let (status, body) = get(app(true), &uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["readinessLevel"], "needs_correction");
        assert_eq!(body["focus"]["templateId"], "affidavit_of_support");
        assert_eq!(
            body["focus"]["qualityIssues"][0],
            "Petitioner signature missing on page 9"
        );
    }
}
