use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known fingerprint key: content/structure of the UI tree.
pub const STRUCTURAL: &str = "structural";
/// Well-known fingerprint key: screenshot bytes.
pub const VISUAL: &str = "visual";
/// Well-known fingerprint key: normalized user-visible text.
pub const SEMANTIC: &str = "semantic";

/// Stable hashes identifying a [`crate::UIState`] along one or more axes.
///
/// A thin wrapper over a string-keyed map rather than fixed fields, since
/// drivers may contribute extra fingerprint axes beyond the three well-known
/// ones. The hash *values* are produced by `atlas-canon`'s
/// `compute_structural`/`compute_visual`/`compute_semantic`; this type only
/// carries them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprints(pub BTreeMap<String, String>);

impl Fingerprints {
    /// An empty fingerprint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The well-known `structural` fingerprint, if present.
    pub fn structural(&self) -> Option<&str> {
        self.0.get(STRUCTURAL).map(String::as_str)
    }

    /// The well-known `visual` fingerprint, if present.
    pub fn visual(&self) -> Option<&str> {
        self.0.get(VISUAL).map(String::as_str)
    }

    /// The well-known `semantic` fingerprint, if present.
    pub fn semantic(&self) -> Option<&str> {
        self.0.get(SEMANTIC).map(String::as_str)
    }

    /// Look up an arbitrary fingerprint key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Merge `other` into a copy of `self`, with `self`'s values taking
    /// priority on key collision.
    pub fn merged_with(&self, other: &Fingerprints) -> Fingerprints {
        let mut merged = other.0.clone();
        merged.extend(self.0.clone());
        Fingerprints(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_self_on_collision() {
        let mut a = BTreeMap::new();
        a.insert(STRUCTURAL.to_string(), "new".to_string());
        let mut b = BTreeMap::new();
        b.insert(STRUCTURAL.to_string(), "old".to_string());
        b.insert(VISUAL.to_string(), "v".to_string());

        let merged = Fingerprints(a).merged_with(&Fingerprints(b));
        assert_eq!(merged.structural(), Some("new"));
        assert_eq!(merged.visual(), Some("v"));
    }
}
