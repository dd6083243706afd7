/// Configuration for a [`crate::GraphStore`].
///
/// Minimal by design; exists so a persistence-backed implementation can grow
/// limits/options later without changing the public constructor shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphStoreConfig {
    /// Maximum number of contexts (`None` = unlimited).
    pub max_contexts: Option<usize>,
    /// Maximum number of states per context (`None` = unlimited).
    pub max_states_per_context: Option<usize>,
    /// Maximum number of transitions per context (`None` = unlimited).
    pub max_transitions_per_context: Option<usize>,
}
