use crate::{Transition, UIState};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Persistable representation of a [`UIState`] in Atlas, scoped to a
/// [`crate::Context`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    /// Identifier of the owning context.
    pub context_id: String,
    /// The wrapped state.
    pub state: UIState,
    /// ISO 8601 UTC timestamp when this state was first recorded.
    #[serde(default = "crate::now_iso8601")]
    pub discovered_at: String,
    /// Whether this state is an entry/root state for the context.
    #[serde(default)]
    pub is_entry: bool,
    /// Whether this state has been observed as terminal (no outgoing
    /// transitions discovered).
    #[serde(default)]
    pub is_terminal: bool,
    /// Free-form tags (e.g. `"menu"`, `"error-screen"`, `"wizard-step"`).
    #[serde(default)]
    pub tags: Vec<String>,
    /// Arbitrary additional Atlas-/pipeline-specific metadata.
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl StateRecord {
    /// Wrap `state` under `context_id`, defaulting `discovered_at` to now.
    pub fn new(context_id: impl Into<String>, state: UIState) -> Self {
        Self {
            context_id: context_id.into(),
            state,
            discovered_at: crate::now_iso8601(),
            is_entry: false,
            is_terminal: false,
            tags: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Shortcut to the underlying state's id.
    pub fn id(&self) -> &str {
        &self.state.id
    }

    /// Shortcut to the underlying state's app_id.
    pub fn app_id(&self) -> &str {
        &self.state.app_id
    }
}

/// Persistable representation of a [`Transition`] in Atlas, scoped to a
/// [`crate::Context`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Identifier of the owning context.
    pub context_id: String,
    /// The wrapped transition.
    pub transition: Transition,
    /// ISO 8601 UTC timestamp when this transition was first recorded.
    #[serde(default = "crate::now_iso8601")]
    pub discovered_at: String,
    /// Number of times this transition has been seen in exploration or
    /// telemetry.
    #[serde(default = "default_times_observed")]
    pub times_observed: u64,
    /// Arbitrary Atlas-/pipeline-specific metadata (e.g. scan id, source of
    /// observation, quality flags).
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

fn default_times_observed() -> u64 {
    1
}

impl TransitionRecord {
    /// Wrap `transition` under `context_id`, defaulting `discovered_at` to
    /// now and `times_observed` to 1.
    pub fn new(context_id: impl Into<String>, transition: Transition) -> Self {
        Self {
            context_id: context_id.into(),
            transition,
            discovered_at: crate::now_iso8601(),
            times_observed: 1,
            metadata: BTreeMap::new(),
        }
    }

    /// Shortcut to the underlying transition's id.
    pub fn id(&self) -> &str {
        &self.transition.id
    }

    /// Shortcut to the underlying transition's source state id.
    pub fn source_state_id(&self) -> &str {
        &self.transition.source_state_id
    }

    /// Shortcut to the underlying transition's target state id.
    pub fn target_state_id(&self) -> &str {
        &self.transition.target_state_id
    }

    /// Shortcut to the underlying transition's intent id.
    pub fn intent_id(&self) -> Option<&str> {
        self.transition.intent_id.as_deref()
    }
}
