use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::case::CaseState;
use super::catalog::{scope_template, SlotCatalog};
use super::condition::evaluate;
use super::domain::{
    DependencyCondition, Document, DocumentStatus, FormResponses, Slot, SlotProgress, SlotStatus,
    SlotTemplate,
};

/// How to treat a document that arrives without a quality verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingQualityCheck {
    #[default]
    TreatAsPassed,
    TreatAsIssue,
}

/// Policy dials applied while deriving slot status from documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolutionPolicy {
    pub missing_quality_check: MissingQualityCheck,
}

impl ResolutionPolicy {
    pub fn strict() -> Self {
        Self {
            missing_quality_check: MissingQualityCheck::TreatAsIssue,
        }
    }

    pub(crate) fn passes_quality(&self, document: &Document) -> bool {
        match &document.quality_check {
            Some(check) => check.passed,
            None => self.missing_quality_check == MissingQualityCheck::TreatAsPassed,
        }
    }
}

/// Resolve every template of the catalog for one case snapshot.
///
/// Statuses are computed in dependency order; the returned slots follow catalog order.
pub(crate) fn resolve_slots(
    catalog: &SlotCatalog,
    state: &CaseState,
    policy: &ResolutionPolicy,
) -> Vec<Slot> {
    let mut statuses: HashMap<&str, SlotStatus> = HashMap::with_capacity(catalog.templates().len());

    for template in catalog.in_resolution_order() {
        let assigned = assigned_documents(&state.documents, &template.id);
        let status = slot_status(template, &assigned, &statuses, &state.responses, policy);
        statuses.insert(template.id.as_str(), status);
    }

    let slots: Vec<Slot> = catalog
        .templates()
        .iter()
        .map(|template| {
            let assigned = assigned_documents(&state.documents, &template.id);
            let status = statuses
                .get(template.id.as_str())
                .copied()
                .unwrap_or(SlotStatus::Hidden);

            // Hidden slots are not part of the case, so nothing satisfies them.
            let satisfied_by_doc_ids = if status.is_visible() {
                assigned
                    .iter()
                    .filter(|document| {
                        document.status == DocumentStatus::Approved
                            && policy.passes_quality(document)
                    })
                    .map(|document| document.id.clone())
                    .collect()
            } else {
                Vec::new()
            };

            Slot {
                template: scope_template(template, &state.case_id),
                template_id: template.id.clone(),
                status,
                satisfied_by_doc_ids,
                progress: SlotProgress {
                    current: assigned.len() as u32,
                    required: template.min_count,
                },
            }
        })
        .collect();

    debug!(
        case_id = %state.case_id,
        visa_type = state.visa_type.key(),
        slots = slots.len(),
        documents = state.documents.len(),
        "resolved evidence slots"
    );

    slots
}

pub(crate) fn assigned_documents<'a>(documents: &'a [Document], template_id: &str) -> Vec<&'a Document> {
    documents
        .iter()
        .filter(|document| document.is_assigned_to(template_id))
        .collect()
}

fn slot_status(
    template: &SlotTemplate,
    assigned: &[&Document],
    resolved: &HashMap<&str, SlotStatus>,
    responses: &FormResponses,
    policy: &ResolutionPolicy,
) -> SlotStatus {
    if let Some(condition) = &template.form_condition {
        if !evaluate(condition, responses) {
            return SlotStatus::Hidden;
        }
    }

    if let Some(dependency) = &template.depends_on {
        let Some(target) = resolved.get(dependency.slot_id.as_str()).copied() else {
            return SlotStatus::Hidden;
        };

        let gated = match dependency.condition {
            DependencyCondition::Satisfied => target != SlotStatus::Satisfied,
            DependencyCondition::Any => target == SlotStatus::Hidden,
            DependencyCondition::Unknown => true,
        };
        if gated {
            return SlotStatus::Hidden;
        }
    }

    document_status(assigned, template.min_count, policy)
}

fn document_status(assigned: &[&Document], min_count: u32, policy: &ResolutionPolicy) -> SlotStatus {
    if assigned.is_empty() {
        return SlotStatus::Empty;
    }

    if assigned.iter().any(|document| !policy.passes_quality(document)) {
        return SlotStatus::Issue;
    }

    let approved = assigned
        .iter()
        .filter(|document| document.status == DocumentStatus::Approved)
        .count() as u32;

    if approved >= min_count {
        SlotStatus::Satisfied
    } else {
        SlotStatus::Partial
    }
}
