use super::super::case::CaseEvidence;
use super::super::domain::{CaseId, Document, Slot, SlotStatus, VisaType};
use super::super::progress::{CategoryProgressEntry, EvidenceProgress};
use super::views::{ReadinessLevel, SlotDetailView};
use serde::Serialize;

/// Serializable readiness picture for UI panels, the API and the CLI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessReport {
    pub case_id: CaseId,
    pub visa_type: VisaType,
    pub visa_label: &'static str,
    pub progress: EvidenceProgress,
    pub completion_pct: f32,
    pub required_completion_pct: f32,
    pub ready_for_submission: bool,
    pub readiness_level: ReadinessLevel,
    pub readiness_label: &'static str,
    pub categories: Vec<CategoryProgressEntry>,
    pub focus: Option<SlotDetailView>,
    pub slots: Vec<SlotDetailView>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hidden_slot_ids: Vec<String>,
}

impl ReadinessReport {
    pub fn from_case(case: &CaseEvidence) -> Self {
        let progress = case.progress();
        let ready_for_submission = progress.is_ready_for_submission();
        let has_issues = case
            .visible_slots()
            .any(|slot| slot.status == SlotStatus::Issue);

        let readiness_level = if has_issues {
            ReadinessLevel::NeedsCorrection
        } else if ready_for_submission {
            ReadinessLevel::ReadyToFile
        } else {
            ReadinessLevel::Collecting
        };

        let slots = case
            .visible_slots()
            .map(|slot| detail_view(slot, &case.get_docs_for_slot(slot.id())))
            .collect();

        let focus = case
            .next_focus_slot()
            .map(|slot| detail_view(slot, &case.get_docs_for_slot(slot.id())));

        let hidden_slot_ids = case
            .slots()
            .iter()
            .filter(|slot| !slot.is_visible())
            .map(|slot| slot.id().to_string())
            .collect();

        Self {
            case_id: case.case_id().clone(),
            visa_type: case.visa_type(),
            visa_label: case.visa_type().label(),
            progress,
            completion_pct: progress.completion_pct(),
            required_completion_pct: progress.required_completion_pct(),
            ready_for_submission,
            readiness_level,
            readiness_label: readiness_level.label(),
            categories: case.category_progress(),
            focus,
            slots,
            hidden_slot_ids,
        }
    }
}

fn detail_view(slot: &Slot, documents: &[&Document]) -> SlotDetailView {
    let template = &slot.template;

    SlotDetailView {
        slot_id: slot.id().to_string(),
        template_id: slot.template_id.clone(),
        name: template.name.clone(),
        category_id: template.category_id.clone(),
        priority: template.priority,
        priority_label: template.priority.label(),
        status: slot.status,
        status_label: slot.status.label(),
        current: slot.progress.current,
        required: slot.progress.required,
        capacity: template.capacity(),
        preferred_document: template
            .preferred_type()
            .map(|accepted| accepted.label.clone()),
        accepted_types: template
            .acceptable_types
            .iter()
            .map(|accepted| accepted.type_id.clone())
            .collect(),
        assigned_document_ids: documents
            .iter()
            .map(|document| document.id.clone())
            .collect(),
        satisfied_by_doc_ids: slot.satisfied_by_doc_ids.clone(),
        quality_issues: documents
            .iter()
            .flat_map(|document| document.quality_issues().iter().cloned())
            .collect(),
    }
}
