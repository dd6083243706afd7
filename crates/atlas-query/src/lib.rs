//! Read-only query and health surface over `atlas-store`.
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod handler;
mod health;
mod response;

pub use handler::QueryHandler;
pub use health::HealthHandler;
pub use response::{
    GetContextResult, GetStateResult, GetTransitionResult, HealthDetails, HealthResult,
    ListContextsResult, ListIncomingResult, ListOutgoingResult, ListStatesResult,
    ListTransitionsResult, ShortestPathResult,
};

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::{Action, ActionType, Context, Platform, StateRecord, Transition, TransitionRecord, UIState};
    use atlas_store::GraphStore;
    use serde_json::json;
    use std::sync::Arc;

    fn store() -> Arc<GraphStore> {
        Arc::new(GraphStore::default())
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

    #[test]
    fn get_context_missing_is_not_found() {
        let q = QueryHandler::new(store());
        assert!(q.get_context("missing").is_err());
    }

    #[test]
    fn list_states_filters_by_tag_only_applies_predicate_once() {
        let s = store();
        s.upsert_context(Context::new("c1", "app")).unwrap();
        let mut st = state("s1");
        st.tags.push(" Menu ".to_string());
        s.upsert_state(st).unwrap();

        let q = QueryHandler::new(s);
        let result = q.list_states("c1", Some("menu"), None, None).unwrap();
        assert_eq!(result.states.len(), 1);
    }

    #[test]
    fn list_states_combines_tag_and_metadata_filters() {
        let s = store();
        s.upsert_context(Context::new("c1", "app")).unwrap();

        let mut tagged_auto = state("s1");
        tagged_auto.tags.push("menu".to_string());
        tagged_auto
            .metadata
            .insert("source".to_string(), json!("auto"));
        s.upsert_state(tagged_auto).unwrap();

        let mut tagged_human = state("s2");
        tagged_human.tags.push("menu".to_string());
        tagged_human
            .metadata
            .insert("source".to_string(), json!("human"));
        s.upsert_state(tagged_human).unwrap();

        let q = QueryHandler::new(s);
        let result = q
            .list_states("c1", Some("menu"), Some("human"), None)
            .unwrap();
        assert_eq!(result.states.len(), 1);
        assert_eq!(result.states[0].id(), "s2");
    }

    #[test]
    fn list_states_missing_context_is_not_found() {
        let q = QueryHandler::new(store());
        assert!(q.list_states("missing", None, None, None).is_err());
    }

    #[test]
    fn list_transitions_filters_by_intent_id() {
        let s = store();
        s.upsert_context(Context::new("c1", "app")).unwrap();
        let mut t1 = transition("t1", "s1", "s2");
        t1.transition.intent_id = Some("save".to_string());
        s.upsert_transition(t1, true).unwrap();
        s.upsert_transition(transition("t2", "s2", "s3"), true)
            .unwrap();

        let q = QueryHandler::new(s);
        let result = q
            .list_transitions("c1", None, None, Some("save"))
            .unwrap();
        assert_eq!(result.transitions.len(), 1);
        assert_eq!(result.transitions[0].id(), "t1");
    }

    #[test]
    fn list_outgoing_requires_known_state() {
        let s = store();
        s.upsert_context(Context::new("c1", "app")).unwrap();
        let q = QueryHandler::new(s);
        assert!(q.list_outgoing("c1", "missing", None, None, None).is_err());
    }

    #[test]
    fn shortest_path_trivial_when_endpoints_match() {
        let s = store();
        s.upsert_context(Context::new("c1", "app")).unwrap();
        s.upsert_state(state("s1")).unwrap();

        let q = QueryHandler::new(s);
        let result = q.shortest_path("c1", "s1", "s1", None).unwrap();
        assert_eq!(result.path, Some(Vec::new()));
    }

    #[test]
    fn shortest_path_none_when_unreachable() {
        let s = store();
        s.upsert_context(Context::new("c1", "app")).unwrap();
        s.upsert_state(state("s1")).unwrap();
        s.upsert_state(state("s2")).unwrap();
        s.upsert_transition(transition("t1", "s1", "s2"), true)
            .unwrap();

        let q = QueryHandler::new(s);
        let result = q.shortest_path("c1", "s2", "s1", None).unwrap();
        assert_eq!(result.path, None);
    }

    #[test]
    fn health_reports_store_wide_counts() {
        let s = store();
        s.upsert_context(Context::new("c1", "app")).unwrap();
        s.upsert_state(state("s1")).unwrap();
        s.upsert_state(state("s2")).unwrap();
        s.upsert_transition(transition("t1", "s1", "s2"), true)
            .unwrap();

        let h = HealthHandler::new(s);
        let result = h.health();
        assert_eq!(result.status, "ok");
        assert_eq!(result.details.contexts, 1);
        assert_eq!(result.details.states, 2);
        assert_eq!(result.details.transitions, 1);
    }
}
