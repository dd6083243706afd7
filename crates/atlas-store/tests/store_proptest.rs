//! Property tests for `GraphStore`'s incidence-index consistency (P1/P2),
//! `times_observed` accounting (P3), and shortest-path optimality (P6).

use atlas_core::{Action, ActionType, Context, StateRecord, Transition, TransitionRecord, UIState};
use atlas_store::GraphStore;
use proptest::prelude::*;
use std::collections::{BTreeSet, VecDeque};

const NODE_COUNT: usize = 6;

fn node_id(i: usize) -> String {
    format!("s{i}")
}

fn ui_state(id: &str) -> UIState {
    UIState {
        id: id.to_string(),
        app_id: "app".to_string(),
        version: None,
        platform: Default::default(),
        locale: None,
        fingerprints: Default::default(),
        screenshot_ref: None,
        interactive_elements: Vec::new(),
        metadata: Default::default(),
    }
}

fn transition(id: usize, src: usize, tgt: usize) -> Transition {
    Transition {
        id: format!("t{id}"),
        source_state_id: node_id(src),
        target_state_id: node_id(tgt),
        action: Action::new(ActionType::Click),
        intent_id: None,
        confidence: 1.0,
        metadata: Default::default(),
    }
}

fn arb_edge() -> impl Strategy<Value = (usize, usize)> {
    (0..NODE_COUNT, 0..NODE_COUNT)
}

fn build_store(edges: &[(usize, usize)]) -> GraphStore {
    let store = GraphStore::default();
    store.upsert_context(Context::new("c1", "app")).unwrap();
    for i in 0..NODE_COUNT {
        store
            .upsert_state(StateRecord::new("c1", ui_state(&node_id(i))))
            .unwrap();
    }
    for (i, (src, tgt)) in edges.iter().enumerate() {
        store
            .upsert_transition(TransitionRecord::new("c1", transition(i, *src, *tgt)), false)
            .unwrap();
    }
    store
}

/// Reference BFS distance, ignoring the store entirely, used as ground
/// truth for P6.
fn reference_distance(edges: &[(usize, usize)], source: usize, target: usize) -> Option<usize> {
    if source == target {
        return Some(0);
    }
    let mut visited: BTreeSet<usize> = BTreeSet::new();
    visited.insert(source);
    let mut queue = VecDeque::new();
    queue.push_back((source, 0usize));
    while let Some((node, dist)) = queue.pop_front() {
        for (src, tgt) in edges {
            if *src != node || visited.contains(tgt) {
                continue;
            }
            if *tgt == target {
                return Some(dist + 1);
            }
            visited.insert(*tgt);
            queue.push_back((*tgt, dist + 1));
        }
    }
    None
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// P1: the outgoing index for a state contains exactly the transition
    /// ids whose stored source matches that state.
    #[test]
    fn outgoing_index_matches_transition_sources(edges in prop::collection::vec(arb_edge(), 0..24)) {
        let store = build_store(&edges);
        for i in 0..NODE_COUNT {
            let expected: BTreeSet<String> = edges
                .iter()
                .enumerate()
                .filter(|(_, (src, _))| *src == i)
                .map(|(idx, _)| format!("t{idx}"))
                .collect();
            let actual: BTreeSet<String> = store
                .list_outgoing("c1", &node_id(i))
                .into_iter()
                .map(|t| t.id().to_string())
                .collect();
            prop_assert_eq!(actual.clone(), expected);
            for tr in store.list_outgoing("c1", &node_id(i)) {
                prop_assert_eq!(tr.source_state_id(), node_id(i).as_str());
            }
        }
    }

    /// P2: the incoming index for a state contains exactly the transition
    /// ids whose stored target matches that state.
    #[test]
    fn incoming_index_matches_transition_targets(edges in prop::collection::vec(arb_edge(), 0..24)) {
        let store = build_store(&edges);
        for i in 0..NODE_COUNT {
            let expected: BTreeSet<String> = edges
                .iter()
                .enumerate()
                .filter(|(_, (_, tgt))| *tgt == i)
                .map(|(idx, _)| format!("t{idx}"))
                .collect();
            let actual: BTreeSet<String> = store
                .list_incoming("c1", &node_id(i))
                .into_iter()
                .map(|t| t.id().to_string())
                .collect();
            prop_assert_eq!(actual.clone(), expected);
            for tr in store.list_incoming("c1", &node_id(i)) {
                prop_assert_eq!(tr.target_state_id(), node_id(i).as_str());
            }
        }
    }

    /// P3: repeated upserts of the same transition with `increment_observed`
    /// raise `times_observed` by exactly one each time.
    #[test]
    fn times_observed_increments_by_one(repeats in 1usize..20, src in 0..NODE_COUNT, tgt in 0..NODE_COUNT) {
        let store = GraphStore::default();
        store.upsert_context(Context::new("c1", "app")).unwrap();
        store.upsert_state(StateRecord::new("c1", ui_state(&node_id(src)))).unwrap();
        store.upsert_state(StateRecord::new("c1", ui_state(&node_id(tgt)))).unwrap();

        for n in 0..repeats {
            store
                .upsert_transition(TransitionRecord::new("c1", transition(0, src, tgt)), true)
                .unwrap();
            let rec = store.get_transition("c1", "t0").unwrap();
            prop_assert_eq!(rec.times_observed, (n + 1) as u64);
        }
    }

    /// P6: `shortest_path` returns a walk whose length matches a
    /// reference BFS distance computed independently of the store, and
    /// every consecutive pair of edges is actually adjacent.
    #[test]
    fn shortest_path_matches_reference_distance(
        edges in prop::collection::vec(arb_edge(), 1..24),
        source in 0..NODE_COUNT,
        target in 0..NODE_COUNT,
    ) {
        let store = build_store(&edges);
        let path = store.shortest_path("c1", &node_id(source), &node_id(target), None);
        let reference = reference_distance(&edges, source, target);

        match (path, reference) {
            (Some(p), Some(d)) => {
                prop_assert_eq!(p.len(), d);
                if !p.is_empty() {
                    prop_assert_eq!(p[0].source_state_id(), node_id(source).as_str());
                    prop_assert_eq!(p[p.len() - 1].target_state_id(), node_id(target).as_str());
                    for pair in p.windows(2) {
                        prop_assert_eq!(pair[0].target_state_id(), pair[1].source_state_id());
                    }
                }
            }
            (None, None) => {}
            (found, expected) => {
                prop_assert!(false, "store returned {found:?}, reference expected distance {expected:?}");
            }
        }
    }
}
