use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A higher-level UI pattern composed of roles and layout conventions.
///
/// Example: modal dialog, toast notification, hamburger menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UIPattern {
    /// Stable identifier (e.g. `"modal_dialog"`).
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Short description of what the pattern represents.
    pub description: String,
    /// Alternative names for the same concept.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Mapping to external vocabularies.
    #[serde(default)]
    pub external_refs: BTreeMap<String, String>,
    /// Roles that typically participate in this pattern.
    #[serde(default)]
    pub typical_roles: Vec<String>,
}
