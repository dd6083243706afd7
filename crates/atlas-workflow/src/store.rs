use crate::Workflow;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};

/// In-memory storage for [`Workflow`] definitions.
///
/// Intentionally separate from `atlas-store`'s `GraphStore` — it stores only
/// workflow definitions (labels, metadata, transition id lists), never the
/// transitions themselves.
#[derive(Default)]
pub struct WorkflowStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    workflows: BTreeMap<String, Workflow>,
    by_context: BTreeMap<String, BTreeSet<String>>,
}

impl WorkflowStore {
    /// Construct an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a workflow definition.
    pub fn upsert_workflow(&self, workflow: Workflow) {
        let mut inner = self.inner.lock();
        inner
            .by_context
            .entry(workflow.context_id.clone())
            .or_default()
            .insert(workflow.workflow_id.clone());
        inner
            .workflows
            .insert(workflow.workflow_id.clone(), workflow);
    }

    /// Return a workflow by id.
    pub fn get_workflow(&self, workflow_id: &str) -> Option<Workflow> {
        self.inner.lock().workflows.get(workflow_id).cloned()
    }

    /// List workflows, optionally filtered by context, intent id, and tag
    /// (trimmed, case-insensitive exact match).
    pub fn list_workflows(
        &self,
        context_id: Option<&str>,
        intent_id: Option<&str>,
        tag: Option<&str>,
    ) -> Vec<Workflow> {
        let inner = self.inner.lock();

        let mut workflows: Vec<Workflow> = if let Some(context_id) = context_id {
            inner
                .by_context
                .get(context_id)
                .into_iter()
                .flatten()
                .filter_map(|id| inner.workflows.get(id).cloned())
                .collect()
        } else {
            inner.workflows.values().cloned().collect()
        };

        if let Some(intent_id) = intent_id {
            workflows.retain(|wf| wf.intent_id.as_deref() == Some(intent_id));
        }

        if let Some(tag) = tag {
            let needle = tag.trim().to_lowercase();
            workflows.retain(|wf| wf.tags.iter().any(|t| t.trim().to_lowercase() == needle));
        }

        workflows
    }

    /// Delete a workflow by id. Returns `true` if it existed and was
    /// removed.
    pub fn delete_workflow(&self, workflow_id: &str) -> bool {
        let mut inner = self.inner.lock();
        let Some(workflow) = inner.workflows.remove(workflow_id) else {
            return false;
        };
        if let Some(set) = inner.by_context.get_mut(&workflow.context_id) {
            set.remove(workflow_id);
            if set.is_empty() {
                inner.by_context.remove(&workflow.context_id);
            }
        }
        true
    }
}
