use crate::{IntentRegistry, PatternRegistry, RoleRegistry};

/// The three ontology registries bundled together, built once at process
/// startup and shared read-only thereafter.
#[derive(Debug, Clone, Default)]
pub struct OntologyRegistries {
    /// UI role vocabulary.
    pub roles: RoleRegistry,
    /// UI pattern vocabulary.
    pub patterns: PatternRegistry,
    /// Semantic intent vocabulary.
    pub intents: IntentRegistry,
}

impl OntologyRegistries {
    /// An empty bundle, with no vocabulary registered in any of the three
    /// registries.
    pub fn new() -> Self {
        Self::default()
    }

    /// A bundle pre-seeded with all three registries' built-in vocabulary.
    pub fn with_builtins() -> Self {
        Self {
            roles: RoleRegistry::with_builtins(),
            patterns: PatternRegistry::with_builtins(),
            intents: IntentRegistry::with_builtins(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_builtins_seeds_all_three_registries() {
        let registries = OntologyRegistries::with_builtins();
        assert_eq!(registries.roles.all().count(), 21);
        assert_eq!(registries.patterns.all().count(), 7);
        assert_eq!(registries.intents.all().count(), 13);
    }

    #[test]
    fn new_is_empty() {
        let registries = OntologyRegistries::new();
        assert_eq!(registries.roles.all().count(), 0);
        assert_eq!(registries.patterns.all().count(), 0);
        assert_eq!(registries.intents.all().count(), 0);
    }
}
