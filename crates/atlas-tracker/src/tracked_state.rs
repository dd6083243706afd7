use atlas_core::UIState;

/// Internal bookkeeping wrapping a tracked [`UIState`].
#[derive(Debug, Clone)]
pub struct TrackedState {
    /// The tracked state.
    pub state: UIState,
    /// ISO 8601 UTC timestamp of the first observation.
    pub first_seen_at: String,
    /// ISO 8601 UTC timestamp of the most recent observation.
    pub last_seen_at: String,
    /// Number of times this state has been observed.
    pub times_seen: u64,
}

impl TrackedState {
    pub(crate) fn new(state: UIState) -> Self {
        let now = atlas_core::now_iso8601();
        Self {
            state,
            first_seen_at: now.clone(),
            last_seen_at: now,
            times_seen: 1,
        }
    }

    /// Record another observation of this state.
    pub fn touch(&mut self) {
        self.times_seen += 1;
        self.last_seen_at = atlas_core::now_iso8601();
    }
}
