//! Builds Atlas ingest bundles from tracked states and observed transitions.
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod exporter;

pub use config::ExporterConfig;
pub use exporter::Exporter;

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::{Fingerprints, Platform, Transition, UIState};
    use atlas_tracker::{StateTracker, StateTrackerConfig};

    fn state(id: &str, app_id: &str) -> UIState {
        UIState {
            id: id.to_string(),
            app_id: app_id.to_string(),
            version: Some("1.0".to_string()),
            platform: Platform::Web,
            locale: Some("en-US".to_string()),
            fingerprints: Fingerprints::new(),
            screenshot_ref: None,
            interactive_elements: Vec::new(),
            metadata: Default::default(),
        }
    }

    #[test]
    fn build_context_infers_app_id_from_first_tracked_state() {
        let mut tracker = StateTracker::new(StateTrackerConfig::default());
        tracker.observe_state(state("s1", "photoshop"));

        let mut exporter = Exporter::new(&tracker, Vec::new(), ExporterConfig::default());
        let ctx = exporter.build_context().unwrap();
        assert_eq!(ctx.app_id, "photoshop");
        assert_eq!(ctx.platform, Platform::Web);
        assert_eq!(ctx.locale.as_deref(), Some("en-US"));
    }

    #[test]
    fn build_context_fails_without_app_id_or_tracked_states() {
        let tracker = StateTracker::new(StateTrackerConfig::default());
        let mut exporter = Exporter::new(&tracker, Vec::new(), ExporterConfig::default());
        assert!(exporter.build_context().is_err());
    }

    #[test]
    fn build_context_is_cached_across_calls() {
        let mut tracker = StateTracker::new(StateTrackerConfig::default());
        tracker.observe_state(state("s1", "photoshop"));

        let mut exporter = Exporter::new(&tracker, Vec::new(), ExporterConfig::default());
        let first = exporter.build_context().unwrap();
        let second = exporter.build_context().unwrap();
        assert_eq!(first.context_id, second.context_id);
    }

    #[test]
    fn build_state_records_marks_entry_and_terminal_states() {
        let mut tracker = StateTracker::new(StateTrackerConfig::default());
        tracker.observe_state(state("s1", "app"));
        tracker.observe_state(state("s2", "app"));

        let transitions = vec![Transition::from_click("t1", "s1", "s2", None)];
        let mut exporter = Exporter::new(&tracker, transitions, ExporterConfig::default());
        let records = exporter.build_state_records().unwrap();

        let s1 = records.iter().find(|r| r.id() == "s1").unwrap();
        let s2 = records.iter().find(|r| r.id() == "s2").unwrap();
        assert!(s1.is_entry, "s1 never appears as a transition target");
        assert!(!s2.is_entry);
        assert!(!s1.is_terminal, "s1 has an outgoing transition");
        assert!(s2.is_terminal, "s2 has no outgoing transitions");
    }

    #[test]
    fn build_state_records_falls_back_to_earliest_state_when_fully_cyclic() {
        let mut tracker = StateTracker::new(StateTrackerConfig::default());
        tracker.observe_state(state("s1", "app"));
        tracker.observe_state(state("s2", "app"));

        // Every state has an incoming edge, so there are no "never a
        // target" candidates; the earliest observed state becomes entry.
        let transitions = vec![
            Transition::from_click("t1", "s1", "s2", None),
            Transition::from_click("t2", "s2", "s1", None),
        ];
        let mut exporter = Exporter::new(&tracker, transitions, ExporterConfig::default());
        let records = exporter.build_state_records().unwrap();
        let entries: Vec<_> = records.iter().filter(|r| r.is_entry).collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id(), "s1");
    }

    #[test]
    fn explicit_entry_state_ids_override_inference() {
        let mut tracker = StateTracker::new(StateTrackerConfig::default());
        tracker.observe_state(state("s1", "app"));
        tracker.observe_state(state("s2", "app"));

        let config = ExporterConfig {
            explicit_entry_state_ids: Some(vec!["s2".to_string()]),
            ..ExporterConfig::default()
        };
        let mut exporter = Exporter::new(&tracker, Vec::new(), config);
        let records = exporter.build_state_records().unwrap();
        assert!(records.iter().find(|r| r.id() == "s2").unwrap().is_entry);
        assert!(!records.iter().find(|r| r.id() == "s1").unwrap().is_entry);
    }

    #[test]
    fn build_transition_records_default_times_observed_to_one() {
        let mut tracker = StateTracker::new(StateTrackerConfig::default());
        tracker.observe_state(state("s1", "app"));
        tracker.observe_state(state("s2", "app"));

        let transitions = vec![Transition::from_click("t1", "s1", "s2", None)];
        let mut exporter = Exporter::new(&tracker, transitions, ExporterConfig::default());
        let records = exporter.build_transition_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].times_observed, 1);
    }

    #[test]
    fn build_bundle_assembles_context_states_and_transitions() {
        let mut tracker = StateTracker::new(StateTrackerConfig::default());
        tracker.observe_state(state("s1", "app"));
        tracker.observe_state(state("s2", "app"));

        let transitions = vec![Transition::from_click("t1", "s1", "s2", None)];
        let mut exporter = Exporter::new(&tracker, transitions, ExporterConfig::default());
        let bundle = exporter.build_bundle().unwrap();

        assert!(bundle.context.is_some());
        assert_eq!(bundle.states.as_ref().unwrap().len(), 2);
        assert_eq!(bundle.transitions.as_ref().unwrap().len(), 1);
    }
}
