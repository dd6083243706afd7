use crate::intent::{normalize, Intent, IntentCategory};
use atlas_error::AtlasError;
use std::collections::BTreeMap;

/// Explicitly constructed registry of [`Intent`]s, indexed by id, synonym,
/// and external reference.
#[derive(Debug, Clone, Default)]
pub struct IntentRegistry {
    by_id: BTreeMap<String, Intent>,
    by_synonym: BTreeMap<String, String>,
    by_external: BTreeMap<String, String>,
}

impl IntentRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-seeded with 13 built-in intents (create_new, open,
    /// save, save_as, export, import, undo, redo, delete, search, print,
    /// settings, help).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for intent in builtin_intents() {
            registry
                .register(intent)
                .expect("builtin intents have unique ids");
        }
        registry
    }

    /// Register an intent.
    ///
    /// Intended to be called once per custom intent at setup time, though it
    /// is safe to call at any point. Re-registering an identical intent
    /// under the same id is a no-op. Registering a *different* intent under
    /// an id that is already taken returns [`AtlasError::conflict`].
    ///
    /// Synonym and external-reference lookups are first-registration-wins:
    /// if two intents share a synonym, only the first one registered is
    /// reachable through it.
    pub fn register(&mut self, intent: Intent) -> Result<(), AtlasError> {
        let key = normalize(&intent.id);
        if let Some(existing) = self.by_id.get(&key) {
            if existing == &intent {
                return Ok(());
            }
            return Err(AtlasError::conflict(format!(
                "intent with id '{}' is already registered",
                intent.id
            )));
        }

        for name in std::iter::once(intent.id.as_str())
            .chain(std::iter::once(intent.label.as_str()))
            .chain(intent.synonyms.iter().map(String::as_str))
        {
            self.by_synonym
                .entry(normalize(name))
                .or_insert_with(|| key.clone());
        }
        for (namespace, ref_id) in &intent.external_refs {
            self.by_external
                .entry(format!("{namespace}:{ref_id}"))
                .or_insert_with(|| key.clone());
        }

        self.by_id.insert(key, intent);
        Ok(())
    }

    /// Find an intent by its stable id.
    pub fn get(&self, intent_id: &str) -> Option<&Intent> {
        self.by_id.get(&normalize(intent_id))
    }

    /// Resolve a natural-language phrase (e.g. a button label) to an intent
    /// via synonym lookup.
    pub fn find_for_phrase(&self, phrase: &str) -> Option<&Intent> {
        let key = self.by_synonym.get(&normalize(phrase))?;
        self.by_id.get(key)
    }

    /// Find an intent by an external reference, e.g.
    /// `find_by_external_ref("wd", "Q22676")`.
    pub fn find_by_external_ref(&self, namespace: &str, ref_id: &str) -> Option<&Intent> {
        let key = self.by_external.get(&format!("{namespace}:{ref_id}"))?;
        self.by_id.get(key)
    }

    /// Iterate over all registered intents.
    pub fn all(&self) -> impl Iterator<Item = &Intent> {
        self.by_id.values()
    }
}

fn builtin_intents() -> Vec<Intent> {
    macro_rules! intent {
        ($id:expr, $category:expr, $label:expr, $desc:expr, [$($syn:expr),* $(,)?]) => {
            Intent {
                id: $id.to_string(),
                category: $category,
                label: $label.to_string(),
                description: $desc.to_string(),
                synonyms: vec![$($syn.to_string()),*],
                external_refs: BTreeMap::new(),
            }
        };
    }

    vec![
        intent!("create_new", IntentCategory::File, "Create New", "Create a new document, file, project, or equivalent entity.", ["new", "new file", "new document", "create", "add new"]),
        intent!("open", IntentCategory::File, "Open", "Open an existing document, file, project, or resource.", ["open file", "open project", "load", "browse..."]),
        intent!("save", IntentCategory::File, "Save", "Save the current state of the document or project.", ["save file", "save changes"]),
        intent!("save_as", IntentCategory::File, "Save As", "Save the current document or project under a new name or location.", ["save copy", "duplicate", "export copy"]),
        intent!("export", IntentCategory::Export, "Export", "Export the current content to another format or target.", ["export as", "export file", "render", "publish"]),
        intent!("import", IntentCategory::Import, "Import", "Import external data or files into the current project.", ["load data", "add from file", "bring in"]),
        intent!("undo", IntentCategory::Edit, "Undo", "Revert the last action.", ["undo last action"]),
        intent!("redo", IntentCategory::Edit, "Redo", "Re-apply the last undone action.", ["redo last action"]),
        intent!("delete", IntentCategory::Edit, "Delete", "Remove the selected item or content.", ["remove", "erase", "trash"]),
        intent!("search", IntentCategory::Navigation, "Search", "Search within the current context or data set.", ["find", "find and replace", "lookup"]),
        intent!("print", IntentCategory::File, "Print", "Print or generate a print-ready representation.", ["print document", "print file"]),
        intent!("settings", IntentCategory::Settings, "Settings", "Open settings, preferences, or configuration.", ["preferences", "options", "configuration"]),
        intent!("help", IntentCategory::Help, "Help", "Open help, documentation, or support resources.", ["documentation", "support", "help center"]),
    ]
}
