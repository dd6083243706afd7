use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A named, ordered sequence of transition ids within a single context.
///
/// A workflow does not duplicate transition data; it only references
/// existing [`atlas_core::TransitionRecord`] entries by id. Resolving those
/// ids against the store is the caller's job (see
/// [`crate::WorkflowHandler::upsert_workflow`] and
/// [`crate::WorkflowHandler::get_workflow`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Unique identifier for this workflow.
    pub workflow_id: String,
    /// Context the referenced transitions belong to.
    pub context_id: String,
    /// Short human-readable name.
    pub label: String,
    /// Longer human-readable description.
    pub description: String,
    /// Ordered transition ids making up this workflow.
    #[serde(default)]
    pub transition_ids: Vec<String>,
    /// Optional intent this workflow fulfils.
    #[serde(default)]
    pub intent_id: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Arbitrary additional metadata.
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}
