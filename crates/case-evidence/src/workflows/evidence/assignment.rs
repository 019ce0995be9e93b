use serde::Serialize;

use super::domain::Slot;

/// Reason a document type cannot be attached to a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum AssignmentRejection {
    #[error("slot '{slot_id}' does not exist for this case")]
    UnknownSlot { slot_id: String },
    #[error("slot '{slot_id}' is not currently visible")]
    HiddenSlot { slot_id: String },
    #[error("document type '{doc_type_id}' is not accepted by slot '{slot_id}'")]
    TypeNotAccepted { slot_id: String, doc_type_id: String },
    #[error("slot '{slot_id}' is full ({current} of {max} documents)")]
    AtCapacity {
        slot_id: String,
        current: u32,
        max: u32,
    },
}

/// Check whether a document of `doc_type_id` may be attached to `slot_id`.
///
/// Read-only; the caller applies the assignment elsewhere.
pub fn check_assignment(
    slots: &[Slot],
    doc_type_id: &str,
    slot_id: &str,
) -> Result<(), AssignmentRejection> {
    let slot = slots
        .iter()
        .find(|slot| slot.id() == slot_id)
        .ok_or_else(|| AssignmentRejection::UnknownSlot {
            slot_id: slot_id.to_string(),
        })?;

    if !slot.is_visible() {
        return Err(AssignmentRejection::HiddenSlot {
            slot_id: slot_id.to_string(),
        });
    }

    if !slot.template.accepts(doc_type_id) {
        return Err(AssignmentRejection::TypeNotAccepted {
            slot_id: slot_id.to_string(),
            doc_type_id: doc_type_id.to_string(),
        });
    }

    let max = slot.template.capacity();
    if slot.progress.current >= max {
        return Err(AssignmentRejection::AtCapacity {
            slot_id: slot_id.to_string(),
            current: slot.progress.current,
            max,
        });
    }

    Ok(())
}

pub fn can_assign_to_slot(slots: &[Slot], doc_type_id: &str, slot_id: &str) -> bool {
    check_assignment(slots, doc_type_id, slot_id).is_ok()
}
