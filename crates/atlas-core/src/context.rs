use crate::Platform;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Version of the Atlas schema used to encode a [`Context`] and its
/// associated states/transitions.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Metadata anchoring a UI graph (states + transitions) to a specific
/// application and runtime environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// Identifier for this context instance; doubles as a logical graph id.
    pub context_id: String,
    /// Logical identifier of the application, e.g. `"photoshop"`.
    pub app_id: String,
    /// Application version string, e.g. `"25.1.0"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Logical platform.
    #[serde(default)]
    pub platform: Platform,
    /// Locale tag (e.g. `"en-US"`) in which this mapping was generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Schema version used to encode this context.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// ISO 8601 UTC timestamp, second precision, when created.
    #[serde(default = "crate::now_iso8601")]
    pub created_at: String,
    /// Free-form environment description (OS version, device type, etc.).
    #[serde(default)]
    pub environment: BTreeMap<String, Value>,
    /// Arbitrary extra metadata; tags, notes, pipeline-specific fields.
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

impl Context {
    /// Construct a new context with defaulted `schema_version` and
    /// `created_at`, and no version/locale/environment/metadata.
    pub fn new(context_id: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            context_id: context_id.into(),
            app_id: app_id.into(),
            version: None,
            platform: Platform::default(),
            locale: None,
            schema_version: default_schema_version(),
            created_at: crate::now_iso8601(),
            environment: BTreeMap::new(),
            metadata: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_current_schema_version() {
        let ctx = Context::new("c1", "app");
        assert_eq!(ctx.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn created_at_looks_like_iso8601_utc() {
        let ctx = Context::new("c1", "app");
        assert!(ctx.created_at.ends_with('Z'));
        assert!(ctx.created_at.contains('T'));
    }

    #[test]
    fn round_trip_serde() {
        let ctx = Context::new("c1", "app");
        let json = serde_json::to_value(&ctx).unwrap();
        let back: Context = serde_json::from_value(json).unwrap();
        assert_eq!(ctx, back);
    }
}
