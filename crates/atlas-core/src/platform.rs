use serde::{Deserialize, Serialize};

/// Logical platform a [`crate::Context`] or [`crate::UIState`] was observed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// A web application rendered in a browser.
    Web,
    /// A native Windows application.
    Windows,
    /// A native Linux application.
    Linux,
    /// A native Android application.
    Android,
    /// A native macOS application.
    Macos,
    /// Anything not covered by the above.
    Other,
}

impl Default for Platform {
    fn default() -> Self {
        Self::Other
    }
}
