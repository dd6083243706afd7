use crate::RequestValidator;
use atlas_core::{Context, StateRecord, TransitionRecord};
use atlas_error::{AtlasError, AtlasResult};
use atlas_store::GraphStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Result of ingesting a single [`Context`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestContextResult {
    /// Id of the ingested context.
    pub context_id: String,
}

/// Result of ingesting a single [`StateRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestStateResult {
    /// Owning context id.
    pub context_id: String,
    /// Id of the ingested state.
    pub state_id: String,
}

/// Result of ingesting a batch of [`StateRecord`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestStatesResult {
    /// Number of states ingested.
    pub count: usize,
    /// Ids of the ingested states, in payload order.
    pub state_ids: Vec<String>,
    /// Distinct context ids touched, sorted.
    pub context_ids: Vec<String>,
}

/// Result of ingesting a single [`TransitionRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestTransitionResult {
    /// Owning context id.
    pub context_id: String,
    /// Id of the ingested transition.
    pub transition_id: String,
}

/// Result of ingesting a batch of [`TransitionRecord`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestTransitionsResult {
    /// Number of transitions ingested.
    pub count: usize,
    /// Ids of the ingested transitions, in payload order.
    pub transition_ids: Vec<String>,
    /// Distinct context ids touched, sorted.
    pub context_ids: Vec<String>,
}

/// A bundle payload: an optional context plus optional batches of states and
/// transitions, ingested in that order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngestBundle {
    /// Context to ingest first, if present.
    #[serde(default)]
    pub context: Option<Context>,
    /// States to ingest after the context, if present.
    #[serde(default)]
    pub states: Option<Vec<StateRecord>>,
    /// Transitions to ingest last, if present.
    #[serde(default)]
    pub transitions: Option<Vec<TransitionRecord>>,
}

/// Summary of which parts of a bundle were ingested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct BundleContextSummary {
    /// Whether a context was present and ingested.
    pub ingested: bool,
    /// The ingested context's id, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
}

/// Summary of a batch ingest within a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct BundleCountSummary {
    /// Number of records ingested.
    pub count: usize,
}

/// Full result of ingesting a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct BundleIngestResult {
    /// Context ingest summary.
    pub context: BundleContextSummary,
    /// State batch ingest summary.
    pub states: BundleCountSummary,
    /// Transition batch ingest summary.
    pub transitions: BundleCountSummary,
}

/// High-level ingest interface over a [`GraphStore`].
///
/// Validates payloads, enforces referential integrity (a state's context
/// must exist; a transition's source/target states must exist), stores them,
/// and returns JSON-serializable summaries. Does not implement HTTP handling
/// directly — see `atlas-daemon`.
#[derive(Clone)]
pub struct IngestHandler {
    store: Arc<GraphStore>,
}

impl IngestHandler {
    /// Construct a handler over the given store.
    pub fn new(store: Arc<GraphStore>) -> Self {
        Self { store }
    }

    /// Ingest a single context.
    ///
    /// If `overwrite` is `false` and the context already exists, returns
    /// [`AtlasError::conflict`].
    pub fn ingest_context(
        &self,
        context: Context,
        overwrite: bool,
    ) -> AtlasResult<IngestContextResult> {
        RequestValidator::validate_context(&context).map_err(join_validation_errors)?;

        if !overwrite && self.store.get_context(&context.context_id).is_some() {
            return Err(AtlasError::conflict(format!(
                "context '{}' already exists",
                context.context_id
            )));
        }

        let context_id = context.context_id.clone();
        self.store.upsert_context(context)?;
        Ok(IngestContextResult { context_id })
    }

    /// Ingest a single state record. The record's context must already
    /// exist.
    pub fn ingest_state_record(&self, record: StateRecord) -> AtlasResult<IngestStateResult> {
        RequestValidator::validate_state_record(&record).map_err(join_validation_errors)?;

        if self.store.get_context(&record.context_id).is_none() {
            return Err(AtlasError::referential(format!(
                "context '{}' does not exist",
                record.context_id
            )));
        }

        let context_id = record.context_id.clone();
        let state_id = record.id().to_string();
        self.store.upsert_state(record)?;
        Ok(IngestStateResult {
            context_id,
            state_id,
        })
    }

    /// Ingest a batch of state records.
    pub fn ingest_state_records(
        &self,
        records: Vec<StateRecord>,
    ) -> AtlasResult<IngestStatesResult> {
        let mut state_ids = Vec::with_capacity(records.len());
        let mut context_ids = BTreeSet::new();

        for record in records {
            let result = self.ingest_state_record(record)?;
            state_ids.push(result.state_id);
            context_ids.insert(result.context_id);
        }

        Ok(IngestStatesResult {
            count: state_ids.len(),
            state_ids,
            context_ids: context_ids.into_iter().collect(),
        })
    }

    /// Ingest a single transition record. The record's context and both its
    /// source and target states must already exist.
    pub fn ingest_transition_record(
        &self,
        record: TransitionRecord,
    ) -> AtlasResult<IngestTransitionResult> {
        RequestValidator::validate_transition_record(&record).map_err(join_validation_errors)?;

        if self.store.get_context(&record.context_id).is_none() {
            return Err(AtlasError::referential(format!(
                "context '{}' does not exist",
                record.context_id
            )));
        }
        if self
            .store
            .get_state(&record.context_id, record.source_state_id())
            .is_none()
        {
            return Err(AtlasError::referential(format!(
                "source state '{}' not found in context '{}'",
                record.source_state_id(),
                record.context_id
            )));
        }
        if self
            .store
            .get_state(&record.context_id, record.target_state_id())
            .is_none()
        {
            return Err(AtlasError::referential(format!(
                "target state '{}' not found in context '{}'",
                record.target_state_id(),
                record.context_id
            )));
        }

        let context_id = record.context_id.clone();
        let transition_id = record.id().to_string();
        self.store.upsert_transition(record, true)?;
        Ok(IngestTransitionResult {
            context_id,
            transition_id,
        })
    }

    /// Ingest a batch of transition records.
    pub fn ingest_transition_records(
        &self,
        records: Vec<TransitionRecord>,
    ) -> AtlasResult<IngestTransitionsResult> {
        let mut transition_ids = Vec::with_capacity(records.len());
        let mut context_ids = BTreeSet::new();

        for record in records {
            let result = self.ingest_transition_record(record)?;
            transition_ids.push(result.transition_id);
            context_ids.insert(result.context_id);
        }

        Ok(IngestTransitionsResult {
            count: transition_ids.len(),
            transition_ids,
            context_ids: context_ids.into_iter().collect(),
        })
    }

    /// Ingest a bundle: an optional context, then optional states, then
    /// optional transitions, in that order.
    pub fn ingest_bundle(&self, bundle: IngestBundle) -> AtlasResult<BundleIngestResult> {
        let mut result = BundleIngestResult::default();

        if let Some(context) = bundle.context {
            let ctx_result = self.ingest_context(context, true)?;
            result.context = BundleContextSummary {
                ingested: true,
                context_id: Some(ctx_result.context_id),
            };
        }

        if let Some(states) = bundle.states {
            let states_result = self.ingest_state_records(states)?;
            result.states = BundleCountSummary {
                count: states_result.count,
            };
        }

        if let Some(transitions) = bundle.transitions {
            let transitions_result = self.ingest_transition_records(transitions)?;
            result.transitions = BundleCountSummary {
                count: transitions_result.count,
            };
        }

        Ok(result)
    }
}

fn join_validation_errors(errors: Vec<String>) -> AtlasError {
    AtlasError::validation(errors.join("; "))
}
