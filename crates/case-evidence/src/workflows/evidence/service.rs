use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::assignment::AssignmentRejection;
use super::case::{CaseEvidence, CaseState};
use super::catalog::CatalogRegistry;
use super::domain::{CaseId, VisaType};
use super::report::ReadinessReport;
use super::resolver::ResolutionPolicy;
use super::store::{DocumentStore, FormResponseStore, StoreError};

/// Outcome of an assignment pre-check, shaped for drag-and-drop targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentCheck {
    pub allowed: bool,
    #[serde(flatten)]
    pub rejection: Option<AssignmentRejection>,
}

impl From<Result<(), AssignmentRejection>> for AssignmentCheck {
    fn from(value: Result<(), AssignmentRejection>) -> Self {
        match value {
            Ok(()) => Self {
                allowed: true,
                rejection: None,
            },
            Err(rejection) => Self {
                allowed: false,
                rejection: Some(rejection),
            },
        }
    }
}

/// Service composing the catalog registry, upstream stores and resolution policy.
pub struct EvidenceService<D, F> {
    registry: Arc<CatalogRegistry>,
    documents: Arc<D>,
    responses: Arc<F>,
    policy: ResolutionPolicy,
}

impl<D, F> EvidenceService<D, F>
where
    D: DocumentStore + 'static,
    F: FormResponseStore + 'static,
{
    pub fn new(
        registry: Arc<CatalogRegistry>,
        documents: Arc<D>,
        responses: Arc<F>,
        policy: ResolutionPolicy,
    ) -> Self {
        Self {
            registry,
            documents,
            responses,
            policy,
        }
    }

    pub fn policy(&self) -> &ResolutionPolicy {
        &self.policy
    }

    /// Gather a fresh snapshot of the case from the upstream stores.
    pub fn snapshot(
        &self,
        case_id: &CaseId,
        visa_type: VisaType,
    ) -> Result<CaseState, EvidenceServiceError> {
        let documents = self.documents.documents_for(case_id)?;
        let responses = self.responses.responses_for(case_id)?;

        Ok(CaseState {
            case_id: case_id.clone(),
            visa_type,
            documents,
            responses,
        })
    }

    /// Resolve a caller-provided snapshot against the registered catalog.
    pub fn resolve_state(&self, state: &CaseState) -> Result<CaseEvidence, EvidenceServiceError> {
        let catalog = self
            .registry
            .catalog(state.visa_type)
            .ok_or(EvidenceServiceError::UnsupportedVisaType(state.visa_type))?;

        let evidence = CaseEvidence::resolve(catalog, state, &self.policy);
        debug!(case_id = %state.case_id, "case evidence resolved");
        Ok(evidence)
    }

    pub fn resolve(
        &self,
        case_id: &CaseId,
        visa_type: VisaType,
    ) -> Result<CaseEvidence, EvidenceServiceError> {
        let state = self.snapshot(case_id, visa_type)?;
        self.resolve_state(&state)
    }

    pub fn report(
        &self,
        case_id: &CaseId,
        visa_type: VisaType,
    ) -> Result<ReadinessReport, EvidenceServiceError> {
        let report = self.resolve(case_id, visa_type)?.report();
        info!(
            case_id = %case_id,
            required = report.progress.required,
            required_satisfied = report.progress.required_satisfied,
            ready = report.ready_for_submission,
            "evidence readiness computed"
        );
        Ok(report)
    }

    pub fn check_assignment(
        &self,
        case_id: &CaseId,
        visa_type: VisaType,
        doc_type_id: &str,
        slot_id: &str,
    ) -> Result<AssignmentCheck, EvidenceServiceError> {
        let evidence = self.resolve(case_id, visa_type)?;
        Ok(evidence.check_assignment(doc_type_id, slot_id).into())
    }

    pub fn can_assign(
        &self,
        case_id: &CaseId,
        visa_type: VisaType,
        doc_type_id: &str,
        slot_id: &str,
    ) -> Result<bool, EvidenceServiceError> {
        self.check_assignment(case_id, visa_type, doc_type_id, slot_id)
            .map(|check| check.allowed)
    }
}

/// Error raised by the evidence service. Resolution itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum EvidenceServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no evidence catalog registered for {}", .0.label())]
    UnsupportedVisaType(VisaType),
}
