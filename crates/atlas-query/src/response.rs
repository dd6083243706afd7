use atlas_core::{Context, StateRecord, TransitionRecord};
use serde::Serialize;

/// Response for [`crate::QueryHandler::list_contexts`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListContextsResult {
    /// All known contexts.
    pub contexts: Vec<Context>,
}

/// Response for [`crate::QueryHandler::get_context`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetContextResult {
    /// The requested context.
    pub context: Context,
}

/// Response for [`crate::QueryHandler::get_state`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetStateResult {
    /// Owning context id.
    pub context_id: String,
    /// The requested state record.
    pub state: StateRecord,
}

/// Response for [`crate::QueryHandler::list_states`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListStatesResult {
    /// Owning context id.
    pub context_id: String,
    /// Matching state records.
    pub states: Vec<StateRecord>,
}

/// Response for [`crate::QueryHandler::get_transition`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetTransitionResult {
    /// Owning context id.
    pub context_id: String,
    /// The requested transition record.
    pub transition: TransitionRecord,
}

/// Response for [`crate::QueryHandler::list_transitions`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListTransitionsResult {
    /// Owning context id.
    pub context_id: String,
    /// Matching transition records.
    pub transitions: Vec<TransitionRecord>,
}

/// Response for [`crate::QueryHandler::list_outgoing`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListOutgoingResult {
    /// Owning context id.
    pub context_id: String,
    /// The state whose outgoing transitions were listed.
    pub state_id: String,
    /// Matching outgoing transition records.
    pub outgoing: Vec<TransitionRecord>,
}

/// Response for [`crate::QueryHandler::list_incoming`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListIncomingResult {
    /// Owning context id.
    pub context_id: String,
    /// The state whose incoming transitions were listed.
    pub state_id: String,
    /// Matching incoming transition records.
    pub incoming: Vec<TransitionRecord>,
}

/// Response for [`crate::QueryHandler::shortest_path`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPathResult {
    /// Owning context id.
    pub context_id: String,
    /// Source state id.
    pub source_state_id: String,
    /// Target state id.
    pub target_state_id: String,
    /// Ordered transitions from source to target, exclusive of the source
    /// state. `Some(vec![])` when source and target are the same state,
    /// `None` when no path exists.
    pub path: Option<Vec<TransitionRecord>>,
}

/// Per-context counts reported by [`crate::HealthHandler::health`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthDetails {
    /// Number of contexts in the store.
    pub contexts: usize,
    /// Total number of states across all contexts.
    pub states: usize,
    /// Total number of transitions across all contexts.
    pub transitions: usize,
}

/// Response for [`crate::HealthHandler::health`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResult {
    /// Always `"ok"`: reachability of the store, not a guarantee that every
    /// subsystem is healthy.
    pub status: String,
    /// Store-wide counts.
    pub details: HealthDetails,
}
