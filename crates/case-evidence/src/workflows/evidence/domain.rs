use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for an immigration case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CaseId(pub String);

impl CaseId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Petition families with a dedicated evidence catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisaType {
    MarriageGreenCard,
    FianceK1,
    H1bSpecialty,
}

impl VisaType {
    pub const fn ordered() -> [Self; 3] {
        [Self::MarriageGreenCard, Self::FianceK1, Self::H1bSpecialty]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MarriageGreenCard => "Marriage-Based Green Card",
            Self::FianceK1 => "K-1 Fiancé(e) Visa",
            Self::H1bSpecialty => "H-1B Specialty Occupation",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::MarriageGreenCard => "marriage_green_card",
            Self::FianceK1 => "fiance_k1",
            Self::H1bSpecialty => "h1b_specialty",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        Self::ordered()
            .into_iter()
            .find(|visa_type| visa_type.key() == normalized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPriority {
    Required,
    Optional,
    Conditional,
}

impl SlotPriority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Required => "Required",
            Self::Optional => "Optional",
            Self::Conditional => "Conditional",
        }
    }
}

/// Resolved readiness of a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Hidden,
    Empty,
    Partial,
    Issue,
    Satisfied,
}

impl SlotStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hidden => "Hidden",
            Self::Empty => "Not Started",
            Self::Partial => "In Progress",
            Self::Issue => "Needs Correction",
            Self::Satisfied => "Complete",
        }
    }

    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Intake questionnaire answer. Matching is done on the kind, never by coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FormValue {
    Bool(bool),
    String(String),
    Number(f64),
    StringArray(Vec<String>),
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<String>> for FormValue {
    fn from(value: Vec<String>) -> Self {
        Self::StringArray(value)
    }
}

/// Per-case intake answers keyed by question id.
pub type FormResponses = BTreeMap<String, FormValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    #[serde(other)]
    Unknown,
}

/// Visibility predicate over intake answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormCondition {
    pub question_id: String,
    pub operator: ConditionOperator,
    pub value: FormValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyCondition {
    Satisfied,
    Any,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDependency {
    pub slot_id: String,
    pub condition: DependencyCondition,
}

/// One kind of document that can fill a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptableDocumentType {
    pub type_id: String,
    pub label: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub is_preferred: bool,
}

fn default_min_count() -> u32 {
    1
}

/// Static definition of an evidence requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotTemplate {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category_id: String,
    pub priority: SlotPriority,
    pub acceptable_types: Vec<AcceptableDocumentType>,
    #[serde(default = "default_min_count")]
    pub min_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<SlotDependency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_condition: Option<FormCondition>,
}

impl SlotTemplate {
    /// Maximum number of documents the slot holds; one when unspecified.
    pub fn capacity(&self) -> u32 {
        self.max_count.unwrap_or(1)
    }

    pub fn accepts(&self, doc_type_id: &str) -> bool {
        self.acceptable_types
            .iter()
            .any(|accepted| accepted.type_id == doc_type_id)
    }

    pub fn preferred_type(&self) -> Option<&AcceptableDocumentType> {
        self.acceptable_types
            .iter()
            .find(|accepted| accepted.is_preferred)
            .or_else(|| self.acceptable_types.first())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Pending,
    Processing,
    Approved,
    Rejected,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QualityCheck {
    pub passed: bool,
    #[serde(default)]
    pub issues: Vec<String>,
}

/// Uploaded document as reported by the document store.
///
/// `assigned_to_slots` holds template ids, not case-scoped slot ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub document_type_id: String,
    pub status: DocumentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_check: Option<QualityCheck>,
    #[serde(default)]
    pub assigned_to_slots: Vec<String>,
}

impl Document {
    pub fn is_assigned_to(&self, template_id: &str) -> bool {
        self.assigned_to_slots.iter().any(|slot| slot == template_id)
    }

    pub fn quality_issues(&self) -> &[String] {
        self.quality_check
            .as_ref()
            .map(|check| check.issues.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotProgress {
    pub current: u32,
    pub required: u32,
}

/// Derived view of a template for one case. Recomputed on every resolution pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(flatten)]
    pub template: SlotTemplate,
    pub template_id: String,
    pub status: SlotStatus,
    /// Approved, quality-passing documents; always empty while the slot is hidden.
    pub satisfied_by_doc_ids: Vec<String>,
    pub progress: SlotProgress,
}

impl Slot {
    /// Case-scoped slot id.
    pub fn id(&self) -> &str {
        &self.template.id
    }

    pub fn priority(&self) -> SlotPriority {
        self.template.priority
    }

    pub fn is_visible(&self) -> bool {
        self.status.is_visible()
    }

    pub fn is_required(&self) -> bool {
        self.template.priority == SlotPriority::Required
    }
}

/// Builds the case-scoped id `{case_id}-{template_id}`.
pub fn case_slot_id(case_id: &CaseId, template_id: &str) -> String {
    format!("{}-{}", case_id.0, template_id)
}
