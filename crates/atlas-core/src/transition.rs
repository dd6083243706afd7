use crate::Action;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Directed edge from one [`crate::UIState`] to another, via a concrete
/// [`Action`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Stable identifier for this transition.
    pub id: String,
    /// ID of the source state.
    pub source_state_id: String,
    /// ID of the target state.
    pub target_state_id: String,
    /// Concrete action that caused the transition.
    pub action: Action,
    /// Optional ID of a semantic intent (e.g. `"save"`, `"export"`).
    ///
    /// Corresponds to an `Intent::id` from `atlas-ontology`. Kept as a bare
    /// string rather than a reference to the `Intent` type so this crate does
    /// not need to depend on `atlas-ontology`; consumers resolve it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent_id: Option<String>,
    /// Confidence, in `[0.0, 1.0]`, that this transition correctly
    /// represents the observed behavior. Not validated at construction; see
    /// `atlas-ingest` for boundary validation.
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    /// Arbitrary additional metadata (driver/source specific).
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

fn default_confidence() -> f64 {
    1.0
}

impl Transition {
    /// Attach a semantic intent id to this transition.
    ///
    /// If `overwrite` is `false` and an intent is already attached, this is
    /// a no-op.
    pub fn attach_intent(&mut self, intent_id: impl Into<String>, overwrite: bool) {
        if self.intent_id.is_some() && !overwrite {
            return;
        }
        self.intent_id = Some(intent_id.into());
    }

    /// Convenience constructor for click-like transitions.
    pub fn from_click(
        id: impl Into<String>,
        source_state_id: impl Into<String>,
        target_state_id: impl Into<String>,
        element_id: Option<String>,
    ) -> Self {
        let action = match element_id {
            Some(element_id) => Action::click(element_id),
            None => Action::new(crate::ActionType::Click),
        };
        Self {
            id: id.into(),
            source_state_id: source_state_id.into(),
            target_state_id: target_state_id.into(),
            action,
            intent_id: None,
            confidence: 1.0,
            metadata: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_intent_sets_when_unset() {
        let mut t = Transition::from_click("t1", "s1", "s2", Some("e1".into()));
        t.attach_intent("save", false);
        assert_eq!(t.intent_id.as_deref(), Some("save"));
    }

    #[test]
    fn attach_intent_respects_overwrite_false() {
        let mut t = Transition::from_click("t1", "s1", "s2", None);
        t.attach_intent("save", true);
        t.attach_intent("export", false);
        assert_eq!(t.intent_id.as_deref(), Some("save"));
    }

    #[test]
    fn attach_intent_overwrites_when_true() {
        let mut t = Transition::from_click("t1", "s1", "s2", None);
        t.attach_intent("save", true);
        t.attach_intent("export", true);
        assert_eq!(t.intent_id.as_deref(), Some("export"));
    }

    #[test]
    fn default_confidence_is_one() {
        let t = Transition::from_click("t1", "s1", "s2", None);
        assert_eq!(t.confidence, 1.0);
    }
}
