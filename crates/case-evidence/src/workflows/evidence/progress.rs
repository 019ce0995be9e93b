use serde::{Deserialize, Serialize};

use super::domain::{Slot, SlotStatus};

/// Completion counts over the visible slot set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceProgress {
    pub total: usize,
    pub satisfied: usize,
    pub required: usize,
    pub required_satisfied: usize,
}

impl EvidenceProgress {
    /// Aggregate resolved slots. Hidden slots are excluded and conditional slots
    /// never count toward the required totals.
    pub fn from_slots(slots: &[Slot]) -> Self {
        slots
            .iter()
            .filter(|slot| slot.is_visible())
            .fold(Self::default(), |mut progress, slot| {
                let satisfied = slot.status == SlotStatus::Satisfied;
                progress.total += 1;
                if satisfied {
                    progress.satisfied += 1;
                }
                if slot.is_required() {
                    progress.required += 1;
                    if satisfied {
                        progress.required_satisfied += 1;
                    }
                }
                progress
            })
    }

    pub fn completion_pct(&self) -> f32 {
        percentage(self.satisfied, self.total)
    }

    pub fn required_completion_pct(&self) -> f32 {
        percentage(self.required_satisfied, self.required)
    }

    /// Submission gate: every visible required slot is satisfied.
    pub fn is_ready_for_submission(&self) -> bool {
        self.required_satisfied == self.required
    }
}

fn percentage(part: usize, whole: usize) -> f32 {
    if whole == 0 {
        return 100.0;
    }
    (part as f32 / whole as f32) * 100.0
}

/// Visible-slot completion for one checklist category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProgressEntry {
    pub category_id: String,
    pub total: usize,
    pub satisfied: usize,
    pub needs_attention: usize,
}

/// Per-category breakdown in order of each category's first appearance.
pub fn category_breakdown(slots: &[Slot]) -> Vec<CategoryProgressEntry> {
    let mut entries: Vec<CategoryProgressEntry> = Vec::new();

    for slot in slots.iter().filter(|slot| slot.is_visible()) {
        let index = match entries
            .iter()
            .position(|entry| entry.category_id == slot.template.category_id)
        {
            Some(index) => index,
            None => {
                entries.push(CategoryProgressEntry {
                    category_id: slot.template.category_id.clone(),
                    total: 0,
                    satisfied: 0,
                    needs_attention: 0,
                });
                entries.len() - 1
            }
        };

        let entry = &mut entries[index];
        entry.total += 1;
        match slot.status {
            SlotStatus::Satisfied => entry.satisfied += 1,
            SlotStatus::Issue => entry.needs_attention += 1,
            SlotStatus::Empty | SlotStatus::Partial if slot.is_required() => {
                entry.needs_attention += 1
            }
            _ => {}
        }
    }

    entries
}
