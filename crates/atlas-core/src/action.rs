use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Low-level action type describing how a [`crate::Transition`] was
/// triggered.
///
/// Intentionally coarse; drivers can extend via [`Action::metadata`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Single primary-button click.
    Click,
    /// Double click.
    DoubleClick,
    /// Secondary-button (context-menu) click.
    RightClick,
    /// A single key press.
    KeyPress,
    /// Free-text entry.
    TextInput,
    /// Focus moved to an element without other interaction.
    Focus,
    /// Pointer hover, no click.
    Hover,
    /// Scroll gesture.
    Scroll,
    /// Single-finger tap on a touch surface.
    TouchTap,
    /// Long-press on a touch surface.
    TouchLongPress,
    /// Any other multi-touch or composite gesture.
    Gesture,
    /// Anything not covered by the above.
    Other,
}

/// Concrete action that caused a [`crate::Transition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Type of interaction.
    #[serde(rename = "type")]
    pub action_type: ActionType,
    /// ID of the element (within the source state) that was the primary
    /// target of the action, if applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    /// Raw input associated with the action, such as a key code or text
    /// snippet. Must be scrubbed of sensitive data by the driver before
    /// being set here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_input: Option<String>,
    /// Additional driver-specific details (e.g. mouse button, modifiers).
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl Action {
    /// Construct an action with no target element, raw input, or metadata.
    pub fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            element_id: None,
            raw_input: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Construct a click action targeting `element_id`.
    pub fn click(element_id: impl Into<String>) -> Self {
        Self {
            action_type: ActionType::Click,
            element_id: Some(element_id.into()),
            raw_input: None,
            metadata: BTreeMap::new(),
        }
    }
}
