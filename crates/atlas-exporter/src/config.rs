use atlas_core::Platform;
use serde_json::Value;
use std::collections::BTreeMap;

/// Configuration for building an [`crate::Exporter`]'s [`atlas_core::Context`]
/// and derived records.
///
/// Every field is optional and, where omitted, inferred from the earliest
/// tracked state (by `first_seen_at`).
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    /// Explicit context id. If `None`, one is generated from `app_id`.
    pub context_id: Option<String>,
    /// Logical application id. If `None`, inferred from the first tracked
    /// state. Required (directly or by inference) — see
    /// [`crate::Exporter::build_context`].
    pub app_id: Option<String>,
    /// Application version string. If `None`, inferred from the first
    /// tracked state.
    pub version: Option<String>,
    /// Logical platform. If `None`, inferred from the first tracked state,
    /// falling back to [`Platform::Other`].
    pub platform: Option<Platform>,
    /// Locale tag. If `None`, inferred from the first tracked state.
    pub locale: Option<String>,
    /// Free-form environment description (OS version, device, etc.).
    pub environment: BTreeMap<String, Value>,
    /// Additional metadata to attach to the built context.
    pub metadata: BTreeMap<String, Value>,
    /// Explicit set of state ids to mark as entry states. If `None`, entry
    /// states are inferred as those that never appear as a transition
    /// target, falling back to the earliest observed state.
    pub explicit_entry_state_ids: Option<Vec<String>>,
    /// Whether to mark states with zero outgoing transitions as terminal.
    pub mark_terminal_states: bool,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            context_id: None,
            app_id: None,
            version: None,
            platform: None,
            locale: None,
            environment: BTreeMap::new(),
            metadata: BTreeMap::new(),
            explicit_entry_state_ids: None,
            mark_terminal_states: true,
        }
    }
}
