use crate::GraphStoreConfig;
use atlas_core::{Context, StateRecord, TransitionRecord};
use atlas_error::{AtlasError, AtlasResult};
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::debug;

/// In-memory implementation of the Atlas graph store.
///
/// The graph is partitioned by `context_id`. Each context has a map of
/// states, a map of transitions, and incidence indices for outgoing and
/// incoming transitions per state.
///
/// All mutation happens behind a single [`parking_lot::Mutex`], locked
/// exactly once per public method; index maintenance runs inside that one
/// critical section via private helpers that never re-enter the public
/// locking API. This gives the atomicity the original's `threading.RLock`
/// provided without needing a genuinely reentrant lock.
pub struct GraphStore {
    config: GraphStoreConfig,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    contexts: BTreeMap<String, Context>,
    states: BTreeMap<String, BTreeMap<String, StateRecord>>,
    transitions: BTreeMap<String, BTreeMap<String, TransitionRecord>>,
    outgoing: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
    incoming: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new(GraphStoreConfig::default())
    }
}

impl GraphStore {
    /// Construct a store with the given configuration.
    pub fn new(config: GraphStoreConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(Inner::default()),
        }
    }

    // -- context operations ------------------------------------------------

    /// Insert or update a [`Context`]. If a context with the same id exists,
    /// it is replaced.
    pub fn upsert_context(&self, context: Context) -> AtlasResult<()> {
        let mut inner = self.inner.lock();
        if let Some(max) = self.config.max_contexts {
            if !inner.contexts.contains_key(&context.context_id) && inner.contexts.len() >= max {
                return Err(AtlasError::capacity_exceeded(format!(
                    "graph store exceeded max_contexts={max}"
                )));
            }
        }
        inner.contexts.insert(context.context_id.clone(), context);
        Ok(())
    }

    /// Return a [`Context`] by id.
    pub fn get_context(&self, context_id: &str) -> Option<Context> {
        self.inner.lock().contexts.get(context_id).cloned()
    }

    /// Return all known contexts.
    pub fn list_contexts(&self) -> Vec<Context> {
        self.inner.lock().contexts.values().cloned().collect()
    }

    // -- state operations ----------------------------------------------------

    /// Insert or update a [`StateRecord`]. If a state with the same
    /// `(context_id, state.id)` exists, it is replaced.
    pub fn upsert_state(&self, record: StateRecord) -> AtlasResult<()> {
        let mut inner = self.inner.lock();
        let ctx_id = record.context_id.clone();
        let state_id = record.id().to_string();

        if let Some(max) = self.config.max_states_per_context {
            let existing = inner.states.get(&ctx_id);
            let already_present = existing.map(|m| m.contains_key(&state_id)).unwrap_or(false);
            if !already_present && existing.map(|m| m.len()).unwrap_or(0) >= max {
                return Err(AtlasError::capacity_exceeded(format!(
                    "context '{ctx_id}' exceeded max_states_per_context={max}"
                )));
            }
        }

        inner
            .states
            .entry(ctx_id)
            .or_default()
            .insert(state_id, record);
        Ok(())
    }

    /// Return a [`StateRecord`] by context and state id.
    pub fn get_state(&self, context_id: &str, state_id: &str) -> Option<StateRecord> {
        self.inner
            .lock()
            .states
            .get(context_id)
            .and_then(|m| m.get(state_id))
            .cloned()
    }

    /// Return all states for a context.
    pub fn list_states(&self, context_id: &str) -> Vec<StateRecord> {
        self.inner
            .lock()
            .states
            .get(context_id)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Return all states in a context tagged with `tag` (trimmed,
    /// case-insensitive match).
    pub fn find_states_by_tag(&self, context_id: &str, tag: &str) -> Vec<StateRecord> {
        let needle = tag.trim().to_lowercase();
        self.inner
            .lock()
            .states
            .get(context_id)
            .map(|m| {
                m.values()
                    .filter(|s| s.tags.iter().any(|t| t.trim().to_lowercase() == needle))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    // -- transition operations ------------------------------------------------

    /// Insert or update a [`TransitionRecord`].
    ///
    /// If a transition with the same `(context_id, transition.id)` exists,
    /// it is replaced and, if `increment_observed` is `true`,
    /// `times_observed` is set to one more than the existing record's value
    /// (overwriting whatever `times_observed` the caller passed in).
    /// Adjacency indices are updated to match any change in source/target.
    pub fn upsert_transition(
        &self,
        mut record: TransitionRecord,
        increment_observed: bool,
    ) -> AtlasResult<()> {
        let mut inner = self.inner.lock();
        let ctx_id = record.context_id.clone();
        let tr_id = record.id().to_string();
        let src = record.source_state_id().to_string();
        let tgt = record.target_state_id().to_string();

        let ctx_transitions = inner.transitions.entry(ctx_id.clone()).or_default();

        if let Some(existing) = ctx_transitions.get(&tr_id) {
            let old_src = existing.source_state_id().to_string();
            let old_tgt = existing.target_state_id().to_string();
            if increment_observed {
                record.times_observed = existing.times_observed + 1;
            }
            if old_src != src {
                if let Some(set) = inner
                    .outgoing
                    .get_mut(&ctx_id)
                    .and_then(|m| m.get_mut(&old_src))
                {
                    set.remove(&tr_id);
                }
            }
            if old_tgt != tgt {
                if let Some(set) = inner
                    .incoming
                    .get_mut(&ctx_id)
                    .and_then(|m| m.get_mut(&old_tgt))
                {
                    set.remove(&tr_id);
                }
            }
        } else if let Some(max) = self.config.max_transitions_per_context {
            if inner.transitions.get(&ctx_id).map(|m| m.len()).unwrap_or(0) >= max {
                return Err(AtlasError::capacity_exceeded(format!(
                    "context '{ctx_id}' exceeded max_transitions_per_context={max}"
                )));
            }
        }

        inner
            .transitions
            .entry(ctx_id.clone())
            .or_default()
            .insert(tr_id.clone(), record);
        inner
            .outgoing
            .entry(ctx_id.clone())
            .or_default()
            .entry(src)
            .or_default()
            .insert(tr_id.clone());
        inner
            .incoming
            .entry(ctx_id)
            .or_default()
            .entry(tgt)
            .or_default()
            .insert(tr_id);
        Ok(())
    }

    /// Return a [`TransitionRecord`] by context and transition id.
    pub fn get_transition(&self, context_id: &str, transition_id: &str) -> Option<TransitionRecord> {
        self.inner
            .lock()
            .transitions
            .get(context_id)
            .and_then(|m| m.get(transition_id))
            .cloned()
    }

    /// Return all transitions for a context.
    pub fn list_transitions(&self, context_id: &str) -> Vec<TransitionRecord> {
        self.inner
            .lock()
            .transitions
            .get(context_id)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Return all transitions outgoing from `state_id`.
    pub fn list_outgoing(&self, context_id: &str, state_id: &str) -> Vec<TransitionRecord> {
        let inner = self.inner.lock();
        Self::resolve(&inner, context_id, inner.outgoing.get(context_id).and_then(|m| m.get(state_id)))
    }

    /// Return all transitions incoming to `state_id`.
    pub fn list_incoming(&self, context_id: &str, state_id: &str) -> Vec<TransitionRecord> {
        let inner = self.inner.lock();
        Self::resolve(&inner, context_id, inner.incoming.get(context_id).and_then(|m| m.get(state_id)))
    }

    fn resolve(
        inner: &Inner,
        context_id: &str,
        ids: Option<&BTreeSet<String>>,
    ) -> Vec<TransitionRecord> {
        let Some(ids) = ids else {
            return Vec::new();
        };
        let ctx_transitions = inner.transitions.get(context_id);
        ids.iter()
            .filter_map(|id| ctx_transitions.and_then(|m| m.get(id)).cloned())
            .collect()
    }

    // -- graph queries ---------------------------------------------------------

    /// Compute a shortest path (fewest transitions) between two states using
    /// BFS, returning the ordered transitions from source to target
    /// (exclusive of the source state itself).
    ///
    /// Returns `Some(vec![])` if `source_state_id == target_state_id`,
    /// `None` if no path exists or the context has no transitions at all.
    pub fn shortest_path(
        &self,
        context_id: &str,
        source_state_id: &str,
        target_state_id: &str,
        max_depth: Option<usize>,
    ) -> Option<Vec<TransitionRecord>> {
        if source_state_id == target_state_id {
            return Some(Vec::new());
        }

        let inner = self.inner.lock();
        let ctx_transitions = inner.transitions.get(context_id)?;
        if ctx_transitions.is_empty() {
            return None;
        }
        let outgoing = inner.outgoing.get(context_id);

        let mut queue = VecDeque::new();
        queue.push_back(source_state_id.to_string());

        let mut visited: BTreeSet<String> = BTreeSet::new();
        visited.insert(source_state_id.to_string());

        let mut prev: BTreeMap<String, (String, String)> = BTreeMap::new();
        let mut depth: BTreeMap<String, usize> = BTreeMap::new();
        depth.insert(source_state_id.to_string(), 0);

        while let Some(current) = queue.pop_front() {
            let current_depth = depth[&current];
            if let Some(limit) = max_depth {
                if current_depth >= limit {
                    continue;
                }
            }

            let Some(out_for_state) = outgoing.and_then(|m| m.get(&current)) else {
                continue;
            };

            for tr_id in out_for_state {
                let Some(tr) = ctx_transitions.get(tr_id) else {
                    continue;
                };
                let next = tr.target_state_id().to_string();
                if visited.contains(&next) {
                    continue;
                }

                visited.insert(next.clone());
                prev.insert(next.clone(), (current.clone(), tr_id.clone()));
                depth.insert(next.clone(), current_depth + 1);

                if next == target_state_id {
                    debug!(%context_id, %source_state_id, %target_state_id, "shortest path found");
                    return Some(reconstruct_path(ctx_transitions, &prev, target_state_id));
                }

                queue.push_back(next);
            }
        }

        None
    }
}

fn reconstruct_path(
    ctx_transitions: &BTreeMap<String, TransitionRecord>,
    prev: &BTreeMap<String, (String, String)>,
    target_state_id: &str,
) -> Vec<TransitionRecord> {
    let mut path = Vec::new();
    let mut current = target_state_id.to_string();

    while let Some((prev_state, tr_id)) = prev.get(&current) {
        if let Some(tr) = ctx_transitions.get(tr_id) {
            path.push(tr.clone());
        }
        current = prev_state.clone();
    }

    path.reverse();
    path
}
