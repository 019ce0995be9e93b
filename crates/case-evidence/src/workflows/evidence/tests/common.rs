use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::evidence::catalog::{CatalogRegistry, SlotCatalog};
use crate::workflows::evidence::domain::{
    AcceptableDocumentType, CaseId, ConditionOperator, DependencyCondition, Document,
    DocumentStatus, FormCondition, FormResponses, FormValue, QualityCheck, SlotDependency,
    SlotPriority, SlotTemplate, VisaType,
};
use crate::workflows::evidence::resolver::ResolutionPolicy;
use crate::workflows::evidence::service::EvidenceService;
use crate::workflows::evidence::store::{DocumentStore, FormResponseStore, StoreError};
use crate::workflows::evidence::{CaseEvidence, CaseState};

pub(super) const CASE: &str = "case-42";

pub(super) fn case_id() -> CaseId {
    CaseId::new(CASE)
}

pub(super) fn scoped(template_id: &str) -> String {
    format!("{CASE}-{template_id}")
}

pub(super) fn accepts(type_id: &str, label: &str) -> AcceptableDocumentType {
    AcceptableDocumentType {
        type_id: type_id.to_string(),
        label: label.to_string(),
        requirements: Vec::new(),
        is_preferred: true,
    }
}

pub(super) fn template(id: &str, priority: SlotPriority, type_id: &str) -> SlotTemplate {
    SlotTemplate {
        id: id.to_string(),
        name: id.replace('_', " "),
        description: None,
        category_id: "general".to_string(),
        priority,
        acceptable_types: vec![accepts(type_id, type_id)],
        min_count: 1,
        max_count: None,
        depends_on: None,
        form_condition: None,
    }
}

pub(super) fn depends(slot_id: &str, condition: DependencyCondition) -> Option<SlotDependency> {
    Some(SlotDependency {
        slot_id: slot_id.to_string(),
        condition,
    })
}

pub(super) fn equals(question_id: &str, value: FormValue) -> Option<FormCondition> {
    Some(FormCondition {
        question_id: question_id.to_string(),
        operator: ConditionOperator::Equals,
        value,
    })
}

/// Passport, Bank Statements (min 3) and a Marriage Certificate gated on marital status.
pub(super) fn sample_templates() -> Vec<SlotTemplate> {
    vec![
        SlotTemplate {
            category_id: "identity".to_string(),
            ..template("passport", SlotPriority::Required, "passport")
        },
        SlotTemplate {
            category_id: "financial".to_string(),
            min_count: 3,
            max_count: Some(4),
            ..template("bank_statements", SlotPriority::Required, "bank_statement")
        },
        SlotTemplate {
            category_id: "relationship".to_string(),
            form_condition: equals("maritalStatus", FormValue::from("married")),
            ..template(
                "marriage_certificate",
                SlotPriority::Required,
                "marriage_certificate",
            )
        },
    ]
}

pub(super) fn sample_catalog() -> SlotCatalog {
    SlotCatalog::new(VisaType::MarriageGreenCard, sample_templates()).expect("catalog is valid")
}

pub(super) fn document(
    id: &str,
    type_id: &str,
    status: DocumentStatus,
    quality_check: Option<QualityCheck>,
    slot: &str,
) -> Document {
    Document {
        id: id.to_string(),
        document_type_id: type_id.to_string(),
        status,
        quality_check,
        assigned_to_slots: vec![slot.to_string()],
    }
}

pub(super) fn passed() -> Option<QualityCheck> {
    Some(QualityCheck {
        passed: true,
        issues: Vec::new(),
    })
}

pub(super) fn failed(issue: &str) -> Option<QualityCheck> {
    Some(QualityCheck {
        passed: false,
        issues: vec![issue.to_string()],
    })
}

pub(super) fn approved(id: &str, type_id: &str, slot: &str) -> Document {
    document(id, type_id, DocumentStatus::Approved, passed(), slot)
}

pub(super) fn responses(entries: &[(&str, FormValue)]) -> FormResponses {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

pub(super) fn state(documents: Vec<Document>, responses: FormResponses) -> CaseState {
    CaseState {
        case_id: case_id(),
        visa_type: VisaType::MarriageGreenCard,
        documents,
        responses,
    }
}

pub(super) fn resolve(catalog: &SlotCatalog, state: &CaseState) -> CaseEvidence {
    CaseEvidence::resolve(catalog, state, &ResolutionPolicy::default())
}

pub(super) fn single() -> FormResponses {
    responses(&[("maritalStatus", FormValue::from("single"))])
}

#[derive(Default)]
pub(super) struct MemoryDocuments {
    documents: Mutex<HashMap<CaseId, Vec<Document>>>,
}

impl MemoryDocuments {
    pub(super) fn put(&self, case_id: &CaseId, documents: Vec<Document>) {
        self.documents
            .lock()
            .expect("documents mutex poisoned")
            .insert(case_id.clone(), documents);
    }
}

impl DocumentStore for MemoryDocuments {
    fn documents_for(&self, case_id: &CaseId) -> Result<Vec<Document>, StoreError> {
        let guard = self.documents.lock().expect("documents mutex poisoned");
        Ok(guard.get(case_id).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub(super) struct MemoryResponses {
    responses: Mutex<HashMap<CaseId, FormResponses>>,
}

impl MemoryResponses {
    pub(super) fn put(&self, case_id: &CaseId, responses: FormResponses) {
        self.responses
            .lock()
            .expect("responses mutex poisoned")
            .insert(case_id.clone(), responses);
    }
}

impl FormResponseStore for MemoryResponses {
    fn responses_for(&self, case_id: &CaseId) -> Result<FormResponses, StoreError> {
        let guard = self.responses.lock().expect("responses mutex poisoned");
        Ok(guard.get(case_id).cloned().unwrap_or_default())
    }
}

pub(super) struct OfflineDocuments;

impl DocumentStore for OfflineDocuments {
    fn documents_for(&self, _case_id: &CaseId) -> Result<Vec<Document>, StoreError> {
        Err(StoreError::Unavailable("document store offline".to_string()))
    }
}

pub(super) fn sample_registry() -> Arc<CatalogRegistry> {
    Arc::new(CatalogRegistry::default().with_catalog(sample_catalog()))
}

pub(super) fn build_service() -> (
    EvidenceService<MemoryDocuments, MemoryResponses>,
    Arc<MemoryDocuments>,
    Arc<MemoryResponses>,
) {
    let documents = Arc::new(MemoryDocuments::default());
    let responses = Arc::new(MemoryResponses::default());
    let service = EvidenceService::new(
        sample_registry(),
        documents.clone(),
        responses.clone(),
        ResolutionPolicy::default(),
    );
    (service, documents, responses)
}

pub(super) async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
