//! Named, ordered transition sequences layered over `atlas-store`.
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod handler;
mod store;
mod workflow;

pub use handler::{
    DeleteWorkflowResult, GetWorkflowResult, ListWorkflowsResult, UpsertWorkflowResult,
    WorkflowHandler,
};
pub use store::WorkflowStore;
pub use workflow::Workflow;

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::{Action, ActionType, Context, Platform, StateRecord, Transition, TransitionRecord, UIState};
    use atlas_store::GraphStore;
    use std::sync::Arc;

    fn handler() -> WorkflowHandler {
        WorkflowHandler::new(Arc::new(GraphStore::default()), Arc::new(WorkflowStore::new()))
    }

    fn state(id: &str) -> StateRecord {
        StateRecord::new(
            "c1",
            UIState {
                id: id.to_string(),
                app_id: "app".to_string(),
                version: None,
                platform: Platform::Web,
                locale: None,
                fingerprints: Default::default(),
                screenshot_ref: None,
                interactive_elements: Vec::new(),
                metadata: Default::default(),
            },
        )
    }

    fn transition(id: &str, src: &str, tgt: &str) -> TransitionRecord {
        TransitionRecord::new(
            "c1",
            Transition {
                id: id.to_string(),
                source_state_id: src.to_string(),
                target_state_id: tgt.to_string(),
                action: Action::new(ActionType::Click),
                intent_id: None,
                confidence: 1.0,
                metadata: Default::default(),
            },
        )
    }

    fn workflow(id: &str, transition_ids: Vec<&str>) -> Workflow {
        Workflow {
            workflow_id: id.to_string(),
            context_id: "c1".to_string(),
            label: "Checkout".to_string(),
            description: "Complete a purchase".to_string(),
            transition_ids: transition_ids.into_iter().map(String::from).collect(),
            intent_id: None,
            tags: Vec::new(),
            metadata: Default::default(),
        }
    }

    fn seeded_handler() -> (Arc<GraphStore>, WorkflowHandler) {
        let store = Arc::new(GraphStore::default());
        store.upsert_context(Context::new("c1", "app")).unwrap();
        store.upsert_state(state("s1")).unwrap();
        store.upsert_state(state("s2")).unwrap();
        store
            .upsert_transition(transition("t1", "s1", "s2"), true)
            .unwrap();
        let handler = WorkflowHandler::new(store.clone(), Arc::new(WorkflowStore::new()));
        (store, handler)
    }

    #[test]
    fn upsert_workflow_requires_known_context() {
        let h = handler();
        assert!(h
            .upsert_workflow(workflow("wf1", vec!["t1"]))
            .is_err());
    }

    #[test]
    fn upsert_workflow_requires_known_transitions() {
        let (_store, h) = seeded_handler();
        assert!(h.upsert_workflow(workflow("wf1", vec!["missing"])).is_err());
    }

    #[test]
    fn upsert_then_get_workflow_round_trips() {
        let (_store, h) = seeded_handler();
        h.upsert_workflow(workflow("wf1", vec!["t1"])).unwrap();
        let result = h.get_workflow("wf1", false).unwrap();
        assert_eq!(result.workflow.workflow_id, "wf1");
        assert!(result.transitions.is_none());
    }

    #[test]
    fn get_workflow_expands_transitions_when_requested() {
        let (_store, h) = seeded_handler();
        h.upsert_workflow(workflow("wf1", vec!["t1"])).unwrap();
        let result = h.get_workflow("wf1", true).unwrap();
        let transitions = result.transitions.unwrap();
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].id(), "t1");
    }

    #[test]
    fn get_workflow_missing_is_not_found() {
        let (_store, h) = seeded_handler();
        assert!(h.get_workflow("missing", false).is_err());
    }

    #[test]
    fn list_workflows_filters_by_tag() {
        let (_store, h) = seeded_handler();
        let mut tagged = workflow("wf1", vec!["t1"]);
        tagged.tags.push("checkout".to_string());
        h.upsert_workflow(tagged).unwrap();
        h.upsert_workflow(workflow("wf2", vec!["t1"])).unwrap();

        let result = h.list_workflows(None, None, Some("checkout")).unwrap();
        assert_eq!(result.workflows.len(), 1);
        assert_eq!(result.workflows[0].workflow_id, "wf1");
    }

    #[test]
    fn delete_workflow_reports_existence() {
        let (_store, h) = seeded_handler();
        h.upsert_workflow(workflow("wf1", vec!["t1"])).unwrap();
        assert!(h.delete_workflow("wf1").deleted);
        assert!(!h.delete_workflow("wf1").deleted);
    }
}
