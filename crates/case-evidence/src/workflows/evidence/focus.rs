use super::domain::{Slot, SlotStatus};

/// Focus tiers, most urgent first.
const FOCUS_TIERS: [(SlotStatus, bool); 4] = [
    (SlotStatus::Issue, true),
    (SlotStatus::Empty, true),
    (SlotStatus::Partial, true),
    (SlotStatus::Issue, false),
];

/// Pick the single most urgent visible slot, or `None` when everything is clear.
///
/// Within a tier the first slot in catalog order wins.
pub fn next_focus_slot(slots: &[Slot]) -> Option<&Slot> {
    FOCUS_TIERS.iter().find_map(|(status, required)| {
        slots.iter().find(|slot| {
            slot.is_visible() && slot.status == *status && slot.is_required() == *required
        })
    })
}
