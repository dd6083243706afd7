use crate::{Workflow, WorkflowStore};
use atlas_core::TransitionRecord;
use atlas_error::{AtlasError, AtlasResult};
use atlas_store::GraphStore;
use serde::Serialize;
use std::sync::Arc;

/// Response for [`WorkflowHandler::upsert_workflow`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpsertWorkflowResult {
    /// The stored workflow definition.
    pub workflow: Workflow,
}

/// Response for [`WorkflowHandler::get_workflow`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetWorkflowResult {
    /// The requested workflow definition.
    pub workflow: Workflow,
    /// Resolved transition records, present only when
    /// `expand_transitions` was requested. A referenced transition that has
    /// since disappeared from the store is silently skipped rather than
    /// failing the whole response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transitions: Option<Vec<TransitionRecord>>,
}

/// Response for [`WorkflowHandler::list_workflows`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListWorkflowsResult {
    /// The context filter that was applied, if any.
    pub context_id: Option<String>,
    /// Matching workflow definitions.
    pub workflows: Vec<Workflow>,
}

/// Response for [`WorkflowHandler::delete_workflow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteWorkflowResult {
    /// Whether a workflow existed and was removed.
    pub deleted: bool,
}

/// High-level workflow management interface.
///
/// Sits on top of a [`GraphStore`] (to validate a workflow's context and
/// referenced transitions) and a [`WorkflowStore`] (to persist the workflow
/// definitions themselves).
#[derive(Clone)]
pub struct WorkflowHandler {
    store: Arc<GraphStore>,
    workflow_store: Arc<WorkflowStore>,
}

impl WorkflowHandler {
    /// Construct a handler over the given stores.
    pub fn new(store: Arc<GraphStore>, workflow_store: Arc<WorkflowStore>) -> Self {
        Self {
            store,
            workflow_store,
        }
    }

    /// Create or update a workflow.
    ///
    /// Requires the workflow's context to exist and every referenced
    /// transition id to exist in that same context.
    pub fn upsert_workflow(&self, workflow: Workflow) -> AtlasResult<UpsertWorkflowResult> {
        if self.store.get_context(&workflow.context_id).is_none() {
            return Err(AtlasError::referential(format!(
                "context '{}' not found",
                workflow.context_id
            )));
        }

        let missing: Vec<&str> = workflow
            .transition_ids
            .iter()
            .filter(|tr_id| {
                self.store
                    .get_transition(&workflow.context_id, tr_id)
                    .is_none()
            })
            .map(|s| s.as_str())
            .collect();

        if !missing.is_empty() {
            return Err(AtlasError::referential(format!(
                "transitions not found in context '{}': {}",
                workflow.context_id,
                missing.join(", ")
            )));
        }

        self.workflow_store.upsert_workflow(workflow.clone());
        Ok(UpsertWorkflowResult { workflow })
    }

    /// Retrieve a single workflow by id, optionally expanding its
    /// transition ids into full [`TransitionRecord`]s.
    pub fn get_workflow(
        &self,
        workflow_id: &str,
        expand_transitions: bool,
    ) -> AtlasResult<GetWorkflowResult> {
        let workflow = self
            .workflow_store
            .get_workflow(workflow_id)
            .ok_or_else(|| AtlasError::not_found(format!("workflow '{workflow_id}' not found")))?;

        let transitions = if expand_transitions {
            Some(
                workflow
                    .transition_ids
                    .iter()
                    .filter_map(|tr_id| self.store.get_transition(&workflow.context_id, tr_id))
                    .collect(),
            )
        } else {
            None
        };

        Ok(GetWorkflowResult {
            workflow,
            transitions,
        })
    }

    /// List workflows, optionally filtered by context, intent id, and tag.
    pub fn list_workflows(
        &self,
        context_id: Option<&str>,
        intent_id: Option<&str>,
        tag: Option<&str>,
    ) -> AtlasResult<ListWorkflowsResult> {
        if let Some(context_id) = context_id {
            if self.store.get_context(context_id).is_none() {
                return Err(AtlasError::not_found(format!(
                    "context '{context_id}' not found"
                )));
            }
        }

        let workflows = self
            .workflow_store
            .list_workflows(context_id, intent_id, tag);

        Ok(ListWorkflowsResult {
            context_id: context_id.map(String::from),
            workflows,
        })
    }

    /// Delete a workflow by id. Never fails: `deleted` is `false` if the
    /// workflow did not exist.
    pub fn delete_workflow(&self, workflow_id: &str) -> DeleteWorkflowResult {
        DeleteWorkflowResult {
            deleted: self.workflow_store.delete_workflow(workflow_id),
        }
    }
}
