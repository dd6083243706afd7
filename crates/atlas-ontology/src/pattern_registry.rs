use crate::pattern::UIPattern;
use atlas_error::AtlasError;
use std::collections::BTreeMap;

/// Explicitly constructed registry of [`UIPattern`]s, keyed by normalized id.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    patterns: BTreeMap<String, UIPattern>,
}

impl PatternRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-seeded with the built-in vocabulary of 7 common UI
    /// patterns (modal dialog, toast notification, hamburger menu, ...).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for pattern in builtin_patterns() {
            registry
                .register(pattern)
                .expect("builtin patterns have unique ids");
        }
        registry
    }

    /// Register a pattern.
    ///
    /// Re-registering an identical pattern under the same id is a no-op.
    /// Registering a *different* pattern under an id that is already taken
    /// returns [`AtlasError::conflict`].
    pub fn register(&mut self, pattern: UIPattern) -> Result<(), AtlasError> {
        let key = normalize(&pattern.id);
        if let Some(existing) = self.patterns.get(&key) {
            if existing == &pattern {
                return Ok(());
            }
            return Err(AtlasError::conflict(format!(
                "pattern with id '{}' is already registered",
                pattern.id
            )));
        }
        self.patterns.insert(key, pattern);
        Ok(())
    }

    /// Look up a pattern by id (trimmed, case-insensitive).
    pub fn get(&self, pattern_id: &str) -> Option<&UIPattern> {
        self.patterns.get(&normalize(pattern_id))
    }

    /// Iterate over all registered patterns.
    pub fn all(&self) -> impl Iterator<Item = &UIPattern> {
        self.patterns.values()
    }
}

fn normalize(id: &str) -> String {
    id.trim().to_lowercase()
}

fn builtin_patterns() -> Vec<UIPattern> {
    macro_rules! pattern {
        ($id:expr, $label:expr, $desc:expr, [$($alias:expr),* $(,)?], [$($role:expr),* $(,)?]) => {
            UIPattern {
                id: $id.to_string(),
                label: $label.to_string(),
                description: $desc.to_string(),
                aliases: vec![$($alias.to_string()),*],
                external_refs: BTreeMap::new(),
                typical_roles: vec![$($role.to_string()),*],
            }
        };
    }

    vec![
        pattern!(
            "modal_dialog",
            "Modal Dialog",
            "Dialog that blocks interaction with the rest of the interface until dismissed.",
            ["modal", "popup dialog"],
            ["dialog", "button"]
        ),
        pattern!(
            "toast_notification",
            "Toast Notification",
            "Transient message overlay that appears and disappears automatically.",
            ["toast", "snackbar"],
            ["status"]
        ),
        pattern!(
            "hamburger_menu",
            "Hamburger Menu",
            "Collapsible navigation menu typically opened from an icon with three horizontal lines.",
            ["nav drawer", "navigation drawer"],
            ["menu", "button"]
        ),
        pattern!(
            "wizard_step",
            "Wizard Step",
            "Step in a multi-step guided workflow (wizard).",
            ["step wizard", "setup wizard step"],
            ["button", "progressbar"]
        ),
        pattern!(
            "toolbar_group",
            "Toolbar Group",
            "Cluster of related controls inside a toolbar.",
            ["tool group"],
            ["toolbar", "button"]
        ),
        pattern!(
            "navigation_bar",
            "Navigation Bar",
            "Primary navigation area, often at the top or side of an application.",
            ["navbar", "app bar"],
            ["link", "button"]
        ),
        pattern!(
            "sidebar",
            "Sidebar",
            "Secondary panel anchored to the left or right side of the main content.",
            ["side panel", "drawer"],
            ["list", "button"]
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_seed_seven_patterns() {
        let registry = PatternRegistry::with_builtins();
        assert_eq!(registry.all().count(), 7);
    }

    #[test]
    fn registering_conflicting_pattern_errors() {
        let mut registry = PatternRegistry::with_builtins();
        let conflict = UIPattern {
            id: "modal_dialog".to_string(),
            label: "Different".to_string(),
            description: "different".to_string(),
            aliases: vec![],
            external_refs: BTreeMap::new(),
            typical_roles: vec![],
        };
        assert!(registry.register(conflict).is_err());
    }
}
