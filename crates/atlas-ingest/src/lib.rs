//! Validated ingest of contexts, states, and transitions into Atlas.
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod handler;
mod validator;

pub use handler::{
    BundleContextSummary, BundleCountSummary, BundleIngestResult, IngestBundle,
    IngestContextResult, IngestHandler, IngestStateResult, IngestStatesResult,
    IngestTransitionResult, IngestTransitionsResult,
};
pub use validator::RequestValidator;

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::{Action, ActionType, Context, Platform, StateRecord, Transition, TransitionRecord, UIState};
    use atlas_store::GraphStore;
    use std::sync::Arc;

    fn handler() -> IngestHandler {
        IngestHandler::new(Arc::new(GraphStore::default()))
    }

    fn state_record(context_id: &str, state_id: &str) -> StateRecord {
        StateRecord::new(
            context_id,
            UIState {
                id: state_id.to_string(),
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

    fn transition_record(context_id: &str, id: &str, src: &str, tgt: &str) -> TransitionRecord {
        TransitionRecord::new(
            context_id,
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

    #[test]
    fn ingest_context_then_state_succeeds() {
        let h = handler();
        h.ingest_context(Context::new("c1", "app"), true).unwrap();
        let result = h.ingest_state_record(state_record("c1", "s1")).unwrap();
        assert_eq!(result.state_id, "s1");
    }

    #[test]
    fn ingest_state_without_context_fails_referential() {
        let h = handler();
        assert!(h.ingest_state_record(state_record("missing", "s1")).is_err());
    }

    #[test]
    fn ingest_context_overwrite_false_rejects_duplicate() {
        let h = handler();
        h.ingest_context(Context::new("c1", "app"), true).unwrap();
        assert!(h.ingest_context(Context::new("c1", "app"), false).is_err());
    }

    #[test]
    fn ingest_transition_requires_both_endpoints() {
        let h = handler();
        h.ingest_context(Context::new("c1", "app"), true).unwrap();
        h.ingest_state_record(state_record("c1", "s1")).unwrap();
        // s2 missing
        assert!(h
            .ingest_transition_record(transition_record("c1", "t1", "s1", "s2"))
            .is_err());

        h.ingest_state_record(state_record("c1", "s2")).unwrap();
        assert!(h
            .ingest_transition_record(transition_record("c1", "t1", "s1", "s2"))
            .is_ok());
    }

    #[test]
    fn ingest_bundle_runs_in_order() {
        let h = handler();
        let bundle = IngestBundle {
            context: Some(Context::new("c1", "app")),
            states: Some(vec![state_record("c1", "s1"), state_record("c1", "s2")]),
            transitions: Some(vec![transition_record("c1", "t1", "s1", "s2")]),
        };
        let result = h.ingest_bundle(bundle).unwrap();
        assert!(result.context.ingested);
        assert_eq!(result.states.count, 2);
        assert_eq!(result.transitions.count, 1);
    }

    #[test]
    fn ingest_bundle_with_nothing_present_is_a_no_op() {
        let h = handler();
        let result = h.ingest_bundle(IngestBundle::default()).unwrap();
        assert!(!result.context.ingested);
        assert_eq!(result.states.count, 0);
        assert_eq!(result.transitions.count, 0);
    }
}
