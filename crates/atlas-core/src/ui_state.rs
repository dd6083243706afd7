use crate::{Fingerprints, InteractiveElement, Platform};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A distinct screen configuration of an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UIState {
    /// Unique identifier within the owning context.
    pub id: String,
    /// Logical application id.
    pub app_id: String,
    /// Application version, if tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Platform the state was captured on.
    pub platform: Platform,
    /// Locale tag (e.g. `"en-US"`), if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Stable hashes identifying this state along structural/visual/semantic
    /// axes, plus any driver-specific extras.
    #[serde(default)]
    pub fingerprints: Fingerprints,
    /// Reference to a stored screenshot (e.g. a URI or content-addressed key).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_ref: Option<String>,
    /// Ordered sequence of interactive elements visible in this state.
    #[serde(default)]
    pub interactive_elements: Vec<InteractiveElement>,
    /// Free-form extras.
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl UIState {
    /// Look up an element by id.
    pub fn get_element(&self, id: &str) -> Option<&InteractiveElement> {
        self.interactive_elements.iter().find(|e| e.id == id)
    }

    /// Elements whose `role` matches `role`, case-insensitively and trimmed.
    pub fn find_elements_by_role(&self, role: &str) -> Vec<&InteractiveElement> {
        let needle = normalize(role);
        self.interactive_elements
            .iter()
            .filter(|e| normalize(&e.role) == needle)
            .collect()
    }

    /// Elements whose `label` matches `label`, case-insensitively and trimmed.
    pub fn find_elements_by_label(&self, label: &str) -> Vec<&InteractiveElement> {
        let needle = normalize(label);
        self.interactive_elements
            .iter()
            .filter(|e| e.label.as_deref().map(normalize).as_deref() == Some(needle.as_str()))
            .collect()
    }
}

fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> UIState {
        UIState {
            id: "s1".into(),
            app_id: "app".into(),
            version: None,
            platform: Platform::Web,
            locale: None,
            fingerprints: Fingerprints::new(),
            screenshot_ref: None,
            interactive_elements: vec![
                InteractiveElement::new("e1", "Button").with_label(" Save "),
                InteractiveElement::new("e2", "link"),
            ],
            metadata: BTreeMap::new(),
        }
    }

    #[test]
    fn find_by_role_is_case_insensitive() {
        let s = state();
        let found = s.find_elements_by_role("button");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "e1");
    }

    #[test]
    fn find_by_label_is_trimmed_and_case_insensitive() {
        let s = state();
        let found = s.find_elements_by_label("save");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "e1");
    }

    #[test]
    fn find_by_label_collapses_internal_whitespace() {
        let mut s = state();
        s.interactive_elements
            .push(InteractiveElement::new("e3", "Button").with_label("Save  File"));
        let found = s.find_elements_by_label("Save File");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "e3");
    }

    #[test]
    fn round_trip_serde() {
        let s = state();
        let json = serde_json::to_value(&s).unwrap();
        let back: UIState = serde_json::from_value(json).unwrap();
        assert_eq!(s, back);
    }
}
