use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// High-level categories for UI roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    /// Something the user can directly act on (button, menu item).
    Interactive,
    /// Groups other elements (dialog, list, toolbar).
    Container,
    /// Pure layout/structure, not independently actionable (row, cell).
    Structural,
    /// Communicates status back to the user (alert, progress bar).
    Feedback,
    /// Accepts user-entered data (textbox, checkbox, slider).
    Input,
    /// Moves the user between views (link, tab).
    Navigation,
    /// Anything not covered by the above.
    Other,
}

/// A role that can be assigned to an [`atlas_core::InteractiveElement`].
///
/// Example: button, link, menuitem, textbox, dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UIRole {
    /// Stable identifier (e.g. `"button"`).
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Short description of what the role represents.
    pub description: String,
    /// Alternative names for the same concept.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Mapping to external vocabularies (e.g. `{"aria-role": "button"}`).
    #[serde(default)]
    pub external_refs: BTreeMap<String, String>,
    /// High-level category.
    pub category: RoleCategory,
}
