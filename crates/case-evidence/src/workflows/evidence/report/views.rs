use super::super::domain::{SlotPriority, SlotStatus};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDetailView {
    pub slot_id: String,
    pub template_id: String,
    pub name: String,
    pub category_id: String,
    pub priority: SlotPriority,
    pub priority_label: &'static str,
    pub status: SlotStatus,
    pub status_label: &'static str,
    pub current: u32,
    pub required: u32,
    pub capacity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_document: Option<String>,
    pub accepted_types: Vec<String>,
    pub assigned_document_ids: Vec<String>,
    pub satisfied_by_doc_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quality_issues: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessLevel {
    ReadyToFile,
    NeedsCorrection,
    Collecting,
}

impl ReadinessLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ReadyToFile => "Ready to File",
            Self::NeedsCorrection => "Needs Correction",
            Self::Collecting => "Collecting Evidence",
        }
    }
}
