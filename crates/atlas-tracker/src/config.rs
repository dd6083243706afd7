/// Configuration for a [`crate::StateTracker`].
#[derive(Debug, Clone)]
pub struct StateTrackerConfig {
    /// Ordered list of fingerprint keys to consider for deduplication. Tried
    /// in order; the first one present on the observed state wins.
    pub prefer_fingerprint_keys: Vec<String>,
    /// If `true` and none of `prefer_fingerprint_keys` are present, fall
    /// back to deduplicating on `UIState::id`.
    pub allow_id_fallback: bool,
    /// If `true` and an observed state has an empty `id`, generate a random
    /// one and assign it before tracking.
    pub auto_generate_ids: bool,
}

impl Default for StateTrackerConfig {
    fn default() -> Self {
        Self {
            prefer_fingerprint_keys: vec![
                atlas_core::STRUCTURAL.to_string(),
                atlas_core::VISUAL.to_string(),
                atlas_core::SEMANTIC.to_string(),
            ],
            allow_id_fallback: true,
            auto_generate_ids: true,
        }
    }
}
