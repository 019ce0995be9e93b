use case_evidence::workflows::evidence::{
    CaseId, Document, DocumentStore, FormResponseStore, FormResponses, StoreError, VisaType,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryDocumentStore {
    documents: Arc<Mutex<HashMap<CaseId, Vec<Document>>>>,
}

impl InMemoryDocumentStore {
    pub(crate) fn replace(&self, case_id: &CaseId, documents: Vec<Document>) {
        let mut guard = self
            .documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        guard.insert(case_id.clone(), documents);
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn documents_for(&self, case_id: &CaseId) -> Result<Vec<Document>, StoreError> {
        let guard = self
            .documents
            .lock()
            .map_err(|_| StoreError::Unavailable("document store lock poisoned".to_string()))?;
        Ok(guard.get(case_id).cloned().unwrap_or_default())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryResponseStore {
    responses: Arc<Mutex<HashMap<CaseId, FormResponses>>>,
}

impl InMemoryResponseStore {
    pub(crate) fn replace(&self, case_id: &CaseId, responses: FormResponses) {
        let mut guard = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        guard.insert(case_id.clone(), responses);
    }
}

impl FormResponseStore for InMemoryResponseStore {
    fn responses_for(&self, case_id: &CaseId) -> Result<FormResponses, StoreError> {
        let guard = self
            .responses
            .lock()
            .map_err(|_| StoreError::Unavailable("response store lock poisoned".to_string()))?;
        Ok(guard.get(case_id).cloned().unwrap_or_default())
    }
}

pub(crate) fn parse_visa_type(raw: &str) -> Result<VisaType, String> {
    VisaType::parse(raw).ok_or_else(|| {
        let supported: Vec<&str> = VisaType::ordered().into_iter().map(VisaType::key).collect();
        format!(
            "unknown visa type '{raw}' (expected one of {})",
            supported.join(", ")
        )
    })
}
