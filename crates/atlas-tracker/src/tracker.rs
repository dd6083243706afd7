use crate::{StateTrackerConfig, TrackedState};
use atlas_core::UIState;
use std::collections::BTreeMap;

/// In-memory tracker for UI states discovered during exploration.
///
/// Deduplicates on fingerprints (falling back to id, if configured) so the
/// same logical screen observed twice collapses to one tracked state with an
/// incremented observation count, rather than two unrelated entries.
///
/// This tracker is independent of Atlas's own graph store: it only ever
/// sees bare [`UIState`] values, never a [`crate::StateTrackerConfig`]-aware
/// persistence layer. Exporting tracked states into Atlas is the job of
/// `atlas-exporter`.
///
/// Unlike `atlas_store::GraphStore`, this type takes `&mut self` rather than
/// wrapping its state behind an internal lock — it mirrors the Python
/// original, which is used single-threaded within one exploration loop.
#[derive(Debug, Default)]
pub struct StateTracker {
    config: StateTrackerConfig,
    states_by_id: BTreeMap<String, TrackedState>,
    index_by_key: BTreeMap<String, String>,
}

impl StateTracker {
    /// Construct a tracker with the given configuration.
    pub fn new(config: StateTrackerConfig) -> Self {
        Self {
            config,
            states_by_id: BTreeMap::new(),
            index_by_key: BTreeMap::new(),
        }
    }

    /// Register an observation of a [`UIState`].
    ///
    /// Returns `(state_id, is_new)`: the canonical id for this logical
    /// state, and whether this observation created a new tracked state
    /// (`true`) or merged into an existing one (`false`).
    pub fn observe_state(&mut self, mut state: UIState) -> (String, bool) {
        if state.id.is_empty() && self.config.auto_generate_ids {
            state.id = generate_state_id();
        }

        let dedup_key = self.make_dedup_key(&state);

        if let Some(key) = &dedup_key {
            if let Some(state_id) = self.index_by_key.get(key).cloned() {
                if let Some(tracked) = self.states_by_id.get_mut(&state_id) {
                    tracked.touch();
                }
                return (state_id, false);
            }
        }

        let state_id = state.id.clone();
        self.states_by_id
            .insert(state_id.clone(), TrackedState::new(state));
        if let Some(key) = dedup_key {
            self.index_by_key.insert(key, state_id.clone());
        }
        (state_id, true)
    }

    /// Return the [`TrackedState`] for a given state id.
    pub fn get_tracked(&self, state_id: &str) -> Option<&TrackedState> {
        self.states_by_id.get(state_id)
    }

    /// Shortcut to the [`UIState`] for a given state id.
    pub fn get_state(&self, state_id: &str) -> Option<&UIState> {
        self.states_by_id.get(state_id).map(|t| &t.state)
    }

    /// Iterate over all tracked states.
    pub fn all_tracked(&self) -> impl Iterator<Item = &TrackedState> {
        self.states_by_id.values()
    }

    /// Return all [`UIState`]s currently tracked.
    pub fn all_states(&self) -> Vec<&UIState> {
        self.states_by_id.values().map(|t| &t.state).collect()
    }

    /// Number of distinct logical states tracked.
    pub fn len(&self) -> usize {
        self.states_by_id.len()
    }

    /// `true` if no states are tracked.
    pub fn is_empty(&self) -> bool {
        self.states_by_id.is_empty()
    }

    fn make_dedup_key(&self, state: &UIState) -> Option<String> {
        for key in &self.config.prefer_fingerprint_keys {
            if let Some(value) = state.fingerprints.get(key) {
                if !value.is_empty() {
                    return Some(format!("{key}:{value}"));
                }
            }
        }
        if self.config.allow_id_fallback && !state.id.is_empty() {
            return Some(format!("id:{}", state.id));
        }
        None
    }
}

fn generate_state_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
