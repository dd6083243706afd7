use crate::BoundingBox;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single interactive (or structural) element within a [`crate::UIState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveElement {
    /// Stable identifier, unique within the owning state.
    pub id: String,
    /// Accessibility/semantic role (e.g. `"button"`, `"textbox"`).
    pub role: String,
    /// Human-visible label, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Position and size, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    /// Path from the root of the UI tree to this element (driver-specific).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Whether the element accepts interaction.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Whether the element is currently visible.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Free-form, driver-specific extras.
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

fn default_true() -> bool {
    true
}

impl InteractiveElement {
    /// Construct a minimal element with default `enabled`/`visible` flags.
    pub fn new(id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            label: None,
            bounding_box: None,
            path: None,
            enabled: true,
            visible: true,
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a label, builder-style.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attach a bounding box, builder-style.
    pub fn with_bounding_box(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }
}
