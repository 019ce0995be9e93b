use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::case::CaseState;
use super::domain::{CaseId, VisaType};
use super::service::{EvidenceService, EvidenceServiceError};
use super::store::{DocumentStore, FormResponseStore};

#[derive(Debug, Deserialize)]
pub(crate) struct EvidenceQuery {
    visa_type: VisaType,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssignmentCheckRequest {
    visa_type: VisaType,
    doc_type_id: String,
    slot_id: String,
}

/// Router builder exposing readiness and assignment endpoints.
pub fn evidence_router<D, F>(service: Arc<EvidenceService<D, F>>) -> Router
where
    D: DocumentStore + 'static,
    F: FormResponseStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/cases/:case_id/evidence",
            get(readiness_handler::<D, F>),
        )
        .route(
            "/api/v1/cases/:case_id/evidence/assignments/check",
            post(assignment_check_handler::<D, F>),
        )
        .route("/api/v1/evidence/resolve", post(resolve_handler::<D, F>))
        .with_state(service)
}

pub(crate) async fn readiness_handler<D, F>(
    State(service): State<Arc<EvidenceService<D, F>>>,
    Path(case_id): Path<String>,
    query: Result<Query<EvidenceQuery>, QueryRejection>,
) -> Response
where
    D: DocumentStore + 'static,
    F: FormResponseStore + 'static,
{
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return json_error(rejection.status(), rejection.body_text()),
    };

    match service.report(&CaseId(case_id), query.visa_type) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn assignment_check_handler<D, F>(
    State(service): State<Arc<EvidenceService<D, F>>>,
    Path(case_id): Path<String>,
    request: Result<axum::Json<AssignmentCheckRequest>, JsonRejection>,
) -> Response
where
    D: DocumentStore + 'static,
    F: FormResponseStore + 'static,
{
    let axum::Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return json_error(rejection.status(), rejection.body_text()),
    };

    let case_id = CaseId(case_id);
    match service.check_assignment(
        &case_id,
        request.visa_type,
        &request.doc_type_id,
        &request.slot_id,
    ) {
        Ok(check) => (StatusCode::OK, axum::Json(check)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn resolve_handler<D, F>(
    State(service): State<Arc<EvidenceService<D, F>>>,
    state: Result<axum::Json<CaseState>, JsonRejection>,
) -> Response
where
    D: DocumentStore + 'static,
    F: FormResponseStore + 'static,
{
    let axum::Json(state) = match state {
        Ok(state) => state,
        Err(rejection) => return json_error(rejection.status(), rejection.body_text()),
    };

    match service.resolve_state(&state) {
        Ok(evidence) => (StatusCode::OK, axum::Json(evidence.report())).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: EvidenceServiceError) -> Response {
    let status = match error {
        EvidenceServiceError::UnsupportedVisaType(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EvidenceServiceError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    json_error(status, error.to_string())
}

/// JSON `{"error": ...}` body shared by service errors and extractor rejections.
fn json_error(status: StatusCode, message: String) -> Response {
    let payload = json!({
        "error": message,
    });
    (status, axum::Json(payload)).into_response()
}
