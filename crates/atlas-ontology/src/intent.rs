use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// High-level buckets for intents, useful for grouping and analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    /// File-level operations (new, open, save, print).
    File,
    /// In-place document edits (undo, redo, delete).
    Edit,
    /// Display/viewport operations.
    View,
    /// Moving between views (search).
    Navigation,
    /// Exporting content to another format or target.
    Export,
    /// Importing external data.
    Import,
    /// Formatting operations.
    Format,
    /// Inserting new content.
    Insert,
    /// Help/documentation/support.
    Help,
    /// Settings/preferences/configuration.
    Settings,
    /// Account-level operations.
    Account,
    /// Data-level operations.
    Data,
    /// Anything not covered by the above.
    Other,
}

/// A semantic intent that can be attached to a [`atlas_core::Transition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Stable, lowercase identifier (e.g. `"save"`, `"export_pdf"`).
    pub id: String,
    /// Broad category for the intent.
    pub category: IntentCategory,
    /// Human-readable label.
    pub label: String,
    /// Short explanation of what the intent means.
    pub description: String,
    /// Alternative phrases often used in UIs for this intent.
    #[serde(default)]
    pub synonyms: Vec<String>,
    /// Mapping to external vocabularies/knowledge bases (e.g. `{"wd": "Q22676"}`).
    #[serde(default)]
    pub external_refs: BTreeMap<String, String>,
}

impl Intent {
    /// Return `true` if `phrase` looks like this intent's label, id, or one
    /// of its synonyms (trimmed, lowercased, whitespace-collapsed).
    pub fn matches_phrase(&self, phrase: &str) -> bool {
        let key = normalize(phrase);
        if key == normalize(&self.label) || key == normalize(&self.id) {
            return true;
        }
        self.synonyms.iter().any(|s| normalize(s) == key)
    }
}

pub(crate) fn normalize(s: &str) -> String {
    s.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}
