use crate::response::{HealthDetails, HealthResult};
use atlas_store::GraphStore;
use std::sync::Arc;

/// Minimal health/status interface over a [`GraphStore`].
///
/// Read-only: verifies only that the store is reachable and can be walked
/// without error, not that every subsystem built on top of it is healthy.
#[derive(Clone)]
pub struct HealthHandler {
    store: Arc<GraphStore>,
}

impl HealthHandler {
    /// Construct a handler over the given store.
    pub fn new(store: Arc<GraphStore>) -> Self {
        Self { store }
    }

    /// Return a minimal health payload: store reachability plus per-context
    /// counts of states and transitions.
    pub fn health(&self) -> HealthResult {
        let contexts = self.store.list_contexts();
        let mut states = 0usize;
        let mut transitions = 0usize;
        for ctx in &contexts {
            states += self.store.list_states(&ctx.context_id).len();
            transitions += self.store.list_transitions(&ctx.context_id).len();
        }

        HealthResult {
            status: "ok".to_string(),
            details: HealthDetails {
                contexts: contexts.len(),
                states,
                transitions,
            },
        }
    }
}
