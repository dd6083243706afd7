//! Domain model for Atlas: the UI graph's node and edge types, and the
//! Atlas-specific record wrappers that scope them to a context.
#![deny(unsafe_code)]
#![warn(missing_docs)]

use chrono::Utc;

mod action;
mod bounding_box;
mod context;
mod fingerprints;
mod interactive_element;
mod platform;
mod record;
mod transition;
mod ui_state;

pub use action::{Action, ActionType};
pub use bounding_box::BoundingBox;
pub use context::{Context, SCHEMA_VERSION};
pub use fingerprints::{Fingerprints, SEMANTIC, STRUCTURAL, VISUAL};
pub use interactive_element::InteractiveElement;
pub use platform::Platform;
pub use record::{StateRecord, TransitionRecord};
pub use transition::Transition;
pub use ui_state::UIState;

/// Current UTC time, formatted as an ISO 8601 timestamp with second
/// precision (e.g. `"2026-07-28T12:00:00Z"`).
pub fn now_iso8601() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
