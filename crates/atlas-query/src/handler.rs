use crate::response::{
    GetContextResult, GetStateResult, GetTransitionResult, ListContextsResult,
    ListIncomingResult, ListOutgoingResult, ListStatesResult, ListTransitionsResult,
    ShortestPathResult,
};
use atlas_core::{StateRecord, TransitionRecord};
use atlas_error::{AtlasError, AtlasResult};
use atlas_store::GraphStore;
use std::sync::Arc;

/// Read-only query interface over a [`GraphStore`].
///
/// Never mutates the store. Missing contexts, states, or transitions are
/// reported as [`AtlasError::not_found`] rather than panicking or returning
/// empty results, so callers can distinguish "nothing matched" from "the
/// thing you asked about doesn't exist".
#[derive(Clone)]
pub struct QueryHandler {
    store: Arc<GraphStore>,
}

impl QueryHandler {
    /// Construct a handler over the given store.
    pub fn new(store: Arc<GraphStore>) -> Self {
        Self { store }
    }

    /// Return all known contexts.
    pub fn list_contexts(&self) -> ListContextsResult {
        ListContextsResult {
            contexts: self.store.list_contexts(),
        }
    }

    /// Return a single context by id.
    pub fn get_context(&self, context_id: &str) -> AtlasResult<GetContextResult> {
        let context = self.require_context(context_id)?;
        Ok(GetContextResult { context })
    }

    /// Return a single state by id.
    pub fn get_state(&self, context_id: &str, state_id: &str) -> AtlasResult<GetStateResult> {
        self.require_context(context_id)?;
        let state = self.require_state(context_id, state_id)?;
        Ok(GetStateResult {
            context_id: context_id.to_string(),
            state,
        })
    }

    /// List states for a context, with optional `tag` / `source` /
    /// `review_status` filters.
    ///
    /// `tag` matches any of [`StateRecord::tags`] (trimmed, case-insensitive);
    /// `source` and `review_status` match the corresponding keys of
    /// [`StateRecord::metadata`] exactly. When only `tag` is given, the
    /// store's indexed [`GraphStore::find_states_by_tag`] is used as the base
    /// set and the tag predicate is not re-applied afterwards — it is
    /// satisfied by construction.
    pub fn list_states(
        &self,
        context_id: &str,
        tag: Option<&str>,
        source: Option<&str>,
        review_status: Option<&str>,
    ) -> AtlasResult<ListStatesResult> {
        self.require_context(context_id)?;

        let tag_only = tag.is_some() && source.is_none() && review_status.is_none();
        let mut records: Vec<StateRecord> = if let (true, Some(tag)) = (tag_only, tag) {
            self.store.find_states_by_tag(context_id, tag)
        } else {
            self.store.list_states(context_id)
        };

        if let Some(source) = source {
            records.retain(|r| metadata_str(&r.metadata, "source") == Some(source));
        }
        if let Some(review_status) = review_status {
            records.retain(|r| metadata_str(&r.metadata, "review_status") == Some(review_status));
        }
        if !tag_only {
            if let Some(tag) = tag {
                let needle = tag.trim().to_lowercase();
                records.retain(|r| r.tags.iter().any(|t| t.trim().to_lowercase() == needle));
            }
        }

        Ok(ListStatesResult {
            context_id: context_id.to_string(),
            states: records,
        })
    }

    /// Return a single transition by id.
    pub fn get_transition(
        &self,
        context_id: &str,
        transition_id: &str,
    ) -> AtlasResult<GetTransitionResult> {
        self.require_context(context_id)?;
        let transition = self
            .store
            .get_transition(context_id, transition_id)
            .ok_or_else(|| {
                AtlasError::not_found(format!(
                    "transition '{transition_id}' not found in context '{context_id}'"
                ))
            })?;
        Ok(GetTransitionResult {
            context_id: context_id.to_string(),
            transition,
        })
    }

    /// List transitions for a context, with optional `source` /
    /// `review_status` / `intent_id` filters.
    pub fn list_transitions(
        &self,
        context_id: &str,
        source: Option<&str>,
        review_status: Option<&str>,
        intent_id: Option<&str>,
    ) -> AtlasResult<ListTransitionsResult> {
        self.require_context(context_id)?;
        let mut records = self.store.list_transitions(context_id);
        apply_transition_filters(&mut records, source, review_status, intent_id);
        Ok(ListTransitionsResult {
            context_id: context_id.to_string(),
            transitions: records,
        })
    }

    /// List transitions outgoing from `state_id`, with the same filters as
    /// [`Self::list_transitions`].
    pub fn list_outgoing(
        &self,
        context_id: &str,
        state_id: &str,
        source: Option<&str>,
        review_status: Option<&str>,
        intent_id: Option<&str>,
    ) -> AtlasResult<ListOutgoingResult> {
        self.require_context(context_id)?;
        self.require_state(context_id, state_id)?;
        let mut records = self.store.list_outgoing(context_id, state_id);
        apply_transition_filters(&mut records, source, review_status, intent_id);
        Ok(ListOutgoingResult {
            context_id: context_id.to_string(),
            state_id: state_id.to_string(),
            outgoing: records,
        })
    }

    /// List transitions incoming to `state_id`, with the same filters as
    /// [`Self::list_transitions`].
    pub fn list_incoming(
        &self,
        context_id: &str,
        state_id: &str,
        source: Option<&str>,
        review_status: Option<&str>,
        intent_id: Option<&str>,
    ) -> AtlasResult<ListIncomingResult> {
        self.require_context(context_id)?;
        self.require_state(context_id, state_id)?;
        let mut records = self.store.list_incoming(context_id, state_id);
        apply_transition_filters(&mut records, source, review_status, intent_id);
        Ok(ListIncomingResult {
            context_id: context_id.to_string(),
            state_id: state_id.to_string(),
            incoming: records,
        })
    }

    /// Compute a shortest path (fewest transitions) between two states.
    ///
    /// `path` is `Some(vec![])` when `source_state_id == target_state_id`,
    /// `None` when no path exists.
    pub fn shortest_path(
        &self,
        context_id: &str,
        source_state_id: &str,
        target_state_id: &str,
        max_depth: Option<usize>,
    ) -> AtlasResult<ShortestPathResult> {
        self.require_context(context_id)?;
        self.require_state(context_id, source_state_id)?;
        self.require_state(context_id, target_state_id)?;

        let path = self
            .store
            .shortest_path(context_id, source_state_id, target_state_id, max_depth);

        Ok(ShortestPathResult {
            context_id: context_id.to_string(),
            source_state_id: source_state_id.to_string(),
            target_state_id: target_state_id.to_string(),
            path,
        })
    }

    fn require_context(&self, context_id: &str) -> AtlasResult<atlas_core::Context> {
        self.store
            .get_context(context_id)
            .ok_or_else(|| AtlasError::not_found(format!("context '{context_id}' not found")))
    }

    fn require_state(&self, context_id: &str, state_id: &str) -> AtlasResult<StateRecord> {
        self.store.get_state(context_id, state_id).ok_or_else(|| {
            AtlasError::not_found(format!(
                "state '{state_id}' not found in context '{context_id}'"
            ))
        })
    }
}

fn apply_transition_filters(
    records: &mut Vec<TransitionRecord>,
    source: Option<&str>,
    review_status: Option<&str>,
    intent_id: Option<&str>,
) {
    if let Some(source) = source {
        records.retain(|r| metadata_str(&r.metadata, "source") == Some(source));
    }
    if let Some(review_status) = review_status {
        records.retain(|r| metadata_str(&r.metadata, "review_status") == Some(review_status));
    }
    if let Some(intent_id) = intent_id {
        records.retain(|r| r.intent_id() == Some(intent_id));
    }
}

fn metadata_str<'a>(
    metadata: &'a std::collections::BTreeMap<String, serde_json::Value>,
    key: &str,
) -> Option<&'a str> {
    metadata.get(key).and_then(|v| v.as_str())
}
