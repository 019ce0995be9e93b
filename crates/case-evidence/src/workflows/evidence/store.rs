use super::domain::{CaseId, Document, FormResponses};

/// Upstream document store. `assigned_to_slots` on returned documents holds template ids.
pub trait DocumentStore: Send + Sync {
    fn documents_for(&self, case_id: &CaseId) -> Result<Vec<Document>, StoreError>;
}

/// Upstream intake questionnaire answers.
pub trait FormResponseStore: Send + Sync {
    fn responses_for(&self, case_id: &CaseId) -> Result<FormResponses, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
