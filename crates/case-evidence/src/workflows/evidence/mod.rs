//! Evidence requirement resolution for immigration case checklists.
//!
//! A visa-specific [`SlotCatalog`] is resolved against a [`CaseState`] snapshot
//! (uploaded documents plus intake answers) into a fresh set of [`Slot`]s. Progress,
//! assignment checks and focus selection are read-only views over that set.

pub(crate) mod assignment;
pub mod case;
pub mod catalog;
pub mod condition;
pub mod domain;
pub(crate) mod focus;
pub mod progress;
pub mod report;
pub(crate) mod resolver;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use assignment::{can_assign_to_slot, check_assignment, AssignmentRejection};
pub use case::{CaseEvidence, CaseState};
pub use catalog::{CatalogError, CatalogRegistry, SlotCatalog};
pub use condition::evaluate;
pub use domain::{
    case_slot_id, AcceptableDocumentType, CaseId, ConditionOperator, DependencyCondition,
    Document, DocumentStatus, FormCondition, FormResponses, FormValue, QualityCheck, Slot,
    SlotDependency, SlotPriority, SlotProgress, SlotStatus, SlotTemplate, VisaType,
};
pub use focus::next_focus_slot;
pub use progress::{CategoryProgressEntry, EvidenceProgress};
pub use report::ReadinessReport;
pub use resolver::{MissingQualityCheck, ResolutionPolicy};
pub use router::evidence_router;
pub use service::{AssignmentCheck, EvidenceService, EvidenceServiceError};
pub use store::{DocumentStore, FormResponseStore, StoreError};
