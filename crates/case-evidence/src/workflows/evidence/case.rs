use serde::{Deserialize, Serialize};

use super::assignment::{can_assign_to_slot, check_assignment, AssignmentRejection};
use super::catalog::SlotCatalog;
use super::domain::{CaseId, Document, FormResponses, Slot, VisaType};
use super::focus::next_focus_slot;
use super::progress::{category_breakdown, CategoryProgressEntry, EvidenceProgress};
use super::report::ReadinessReport;
use super::resolver::{assigned_documents, resolve_slots, ResolutionPolicy};

/// Immutable input snapshot for one resolution pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseState {
    pub case_id: CaseId,
    pub visa_type: VisaType,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub responses: FormResponses,
}

impl CaseState {
    pub fn new(case_id: CaseId, visa_type: VisaType) -> Self {
        Self {
            case_id,
            visa_type,
            documents: Vec::new(),
            responses: FormResponses::new(),
        }
    }
}

/// Resolved evidence picture for a case snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseEvidence {
    case_id: CaseId,
    visa_type: VisaType,
    slots: Vec<Slot>,
    documents: Vec<Document>,
}

impl CaseEvidence {
    pub fn resolve(catalog: &SlotCatalog, state: &CaseState, policy: &ResolutionPolicy) -> Self {
        Self {
            case_id: state.case_id.clone(),
            visa_type: state.visa_type,
            slots: resolve_slots(catalog, state, policy),
            documents: state.documents.clone(),
        }
    }

    pub fn case_id(&self) -> &CaseId {
        &self.case_id
    }

    pub fn visa_type(&self) -> VisaType {
        self.visa_type
    }

    /// Resolved slots in catalog order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn visible_slots(&self) -> impl Iterator<Item = &Slot> + '_ {
        self.slots.iter().filter(|slot| slot.is_visible())
    }

    pub fn progress(&self) -> EvidenceProgress {
        EvidenceProgress::from_slots(&self.slots)
    }

    pub fn category_progress(&self) -> Vec<CategoryProgressEntry> {
        category_breakdown(&self.slots)
    }

    pub fn is_ready_for_submission(&self) -> bool {
        self.progress().is_ready_for_submission()
    }

    /// Look up a slot by its case-scoped id.
    pub fn get_slot_by_id(&self, slot_id: &str) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.id() == slot_id)
    }

    /// Documents currently attributed to the slot with the given case-scoped id.
    pub fn get_docs_for_slot(&self, slot_id: &str) -> Vec<&Document> {
        match self.get_slot_by_id(slot_id) {
            Some(slot) => assigned_documents(&self.documents, &slot.template_id),
            None => Vec::new(),
        }
    }

    pub fn can_assign_to_slot(&self, doc_type_id: &str, slot_id: &str) -> bool {
        can_assign_to_slot(&self.slots, doc_type_id, slot_id)
    }

    pub fn check_assignment(
        &self,
        doc_type_id: &str,
        slot_id: &str,
    ) -> Result<(), AssignmentRejection> {
        check_assignment(&self.slots, doc_type_id, slot_id)
    }

    pub fn next_focus_slot(&self) -> Option<&Slot> {
        next_focus_slot(&self.slots)
    }

    pub fn report(&self) -> ReadinessReport {
        ReadinessReport::from_case(self)
    }
}
