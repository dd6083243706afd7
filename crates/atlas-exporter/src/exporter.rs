use crate::ExporterConfig;
use atlas_core::{Context, StateRecord, Transition, TransitionRecord};
use atlas_error::{AtlasError, AtlasResult};
use atlas_ingest::IngestBundle;
use atlas_tracker::{StateTracker, TrackedState};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};

/// Builds Atlas-ready [`Context`] / [`StateRecord`] / [`TransitionRecord`]
/// values from a [`StateTracker`]'s tracked states and a list of observed
/// [`Transition`]s, and assembles them into an [`IngestBundle`].
///
/// Performs no I/O. `transitions` is a required constructor argument: a
/// state tracker with no observed transitions is a valid exploration result
/// (a single-screen app), but it must be stated explicitly rather than
/// silently defaulted to empty.
pub struct Exporter<'a> {
    state_tracker: &'a StateTracker,
    transitions: Vec<Transition>,
    config: ExporterConfig,
    context: Option<Context>,
}

impl<'a> Exporter<'a> {
    /// Construct an exporter over a tracker's tracked states and a list of
    /// observed transitions.
    pub fn new(
        state_tracker: &'a StateTracker,
        transitions: Vec<Transition>,
        config: ExporterConfig,
    ) -> Self {
        Self {
            state_tracker,
            transitions,
            config,
            context: None,
        }
    }

    /// Build (and cache) the [`Context`] for this export.
    ///
    /// Uses explicit configuration where provided, falling back to values
    /// inferred from the earliest tracked state. Fails if `app_id` is
    /// neither configured nor inferrable.
    pub fn build_context(&mut self) -> AtlasResult<Context> {
        if let Some(context) = &self.context {
            return Ok(context.clone());
        }

        let first_tracked = self.first_tracked_state();

        let app_id = self
            .config
            .app_id
            .clone()
            .or_else(|| first_tracked.map(|ts| ts.state.app_id.clone()))
            .ok_or_else(|| {
                AtlasError::validation(
                    "ExporterConfig.app_id is not set and could not be inferred from tracked states",
                )
            })?;

        let context_id = self
            .config
            .context_id
            .clone()
            .unwrap_or_else(|| generate_context_id(&app_id));

        let version = self
            .config
            .version
            .clone()
            .or_else(|| first_tracked.and_then(|ts| ts.state.version.clone()));
        let platform = self
            .config
            .platform
            .or_else(|| first_tracked.map(|ts| ts.state.platform))
            .unwrap_or_default();
        let locale = self
            .config
            .locale
            .clone()
            .or_else(|| first_tracked.and_then(|ts| ts.state.locale.clone()));

        let context = Context {
            context_id,
            app_id,
            version,
            platform,
            locale,
            schema_version: atlas_core::SCHEMA_VERSION.to_string(),
            created_at: atlas_core::now_iso8601(),
            environment: self.config.environment.clone(),
            metadata: self.config.metadata.clone(),
        };

        self.context = Some(context.clone());
        Ok(context)
    }

    /// Build [`StateRecord`]s for every tracked state, deriving `is_entry`
    /// and `is_terminal` from the observed transitions and configuration.
    pub fn build_state_records(&mut self) -> AtlasResult<Vec<StateRecord>> {
        let context_id = self.build_context()?.context_id;

        let tracked_states: Vec<&TrackedState> = self.state_tracker.all_tracked().collect();
        let outgoing_counts = self.compute_outgoing_counts();
        let entry_ids = self.determine_entry_state_ids(&tracked_states);

        let mark_terminal = self.config.mark_terminal_states;

        Ok(tracked_states
            .into_iter()
            .map(|tracked| {
                let state_id = tracked.state.id.clone();
                let is_entry = entry_ids.contains(&state_id);
                let is_terminal =
                    mark_terminal && outgoing_counts.get(&state_id).copied().unwrap_or(0) == 0;

                let mut metadata = BTreeMap::new();
                metadata.insert("first_seen_at".to_string(), json!(tracked.first_seen_at));
                metadata.insert("last_seen_at".to_string(), json!(tracked.last_seen_at));
                metadata.insert("times_seen".to_string(), json!(tracked.times_seen));

                StateRecord {
                    context_id: context_id.clone(),
                    state: tracked.state.clone(),
                    discovered_at: tracked.first_seen_at.clone(),
                    is_entry,
                    is_terminal,
                    tags: Vec::new(),
                    metadata,
                }
            })
            .collect())
    }

    /// Build [`TransitionRecord`]s for every observed transition, each
    /// defaulting `times_observed` to 1. A downstream store (e.g.
    /// `atlas_store::GraphStore`) merges identical transitions and raises
    /// the observation count.
    pub fn build_transition_records(&mut self) -> AtlasResult<Vec<TransitionRecord>> {
        let context_id = self.build_context()?.context_id;
        Ok(self
            .transitions
            .iter()
            .cloned()
            .map(|transition| TransitionRecord::new(context_id.clone(), transition))
            .collect())
    }

    /// Build a complete [`IngestBundle`] ready to hand to `atlas-ingest` or
    /// POST to `/ingest/bundle`.
    pub fn build_bundle(&mut self) -> AtlasResult<IngestBundle> {
        let context = self.build_context()?;
        let states = self.build_state_records()?;
        let transitions = self.build_transition_records()?;

        Ok(IngestBundle {
            context: Some(context),
            states: Some(states),
            transitions: Some(transitions),
        })
    }

    fn first_tracked_state(&self) -> Option<&TrackedState> {
        self.state_tracker
            .all_tracked()
            .min_by(|a, b| a.first_seen_at.cmp(&b.first_seen_at))
    }

    fn compute_outgoing_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for transition in &self.transitions {
            *counts.entry(transition.source_state_id.clone()).or_insert(0) += 1;
        }
        counts
    }

    fn determine_entry_state_ids(&self, tracked_states: &[&TrackedState]) -> BTreeSet<String> {
        if let Some(explicit) = &self.config.explicit_entry_state_ids {
            return explicit.iter().cloned().collect();
        }

        let all_ids: BTreeSet<String> =
            tracked_states.iter().map(|ts| ts.state.id.clone()).collect();
        let targets: BTreeSet<String> = self
            .transitions
            .iter()
            .map(|t| t.target_state_id.clone())
            .collect();
        let entry_candidates: BTreeSet<String> =
            all_ids.difference(&targets).cloned().collect();

        if !entry_candidates.is_empty() {
            return entry_candidates;
        }

        self.first_tracked_state()
            .map(|ts| BTreeSet::from([ts.state.id.clone()]))
            .unwrap_or_default()
    }
}

fn generate_context_id(app_id: &str) -> String {
    let prefix = app_id.replace(' ', "_").to_lowercase();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &suffix[..8])
}
