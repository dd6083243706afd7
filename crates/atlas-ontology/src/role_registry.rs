use crate::role::{RoleCategory, UIRole};
use atlas_error::AtlasError;
use std::collections::BTreeMap;

/// Explicitly constructed registry of [`UIRole`]s, keyed by normalized id.
///
/// Unlike the module-level globals in the original Python implementation,
/// this registry is a plain value: callers decide whether to build an empty
/// one, seed it with [`RoleRegistry::with_builtins`], or share one instance
/// across a process.
#[derive(Debug, Clone, Default)]
pub struct RoleRegistry {
    roles: BTreeMap<String, UIRole>,
}

impl RoleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-seeded with the built-in vocabulary of 21 common UI
    /// roles (button, link, menu, textbox, dialog, ...).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for role in builtin_roles() {
            registry
                .register(role)
                .expect("builtin roles have unique ids");
        }
        registry
    }

    /// Register a role.
    ///
    /// Re-registering an identical role under the same id is a no-op.
    /// Registering a *different* role under an id that is already taken
    /// returns [`AtlasError::conflict`].
    pub fn register(&mut self, role: UIRole) -> Result<(), AtlasError> {
        let key = normalize(&role.id);
        if let Some(existing) = self.roles.get(&key) {
            if existing == &role {
                return Ok(());
            }
            return Err(AtlasError::conflict(format!(
                "role with id '{}' is already registered",
                role.id
            )));
        }
        self.roles.insert(key, role);
        Ok(())
    }

    /// Look up a role by id (trimmed, case-insensitive).
    pub fn get(&self, role_id: &str) -> Option<&UIRole> {
        self.roles.get(&normalize(role_id))
    }

    /// Iterate over all registered roles.
    pub fn all(&self) -> impl Iterator<Item = &UIRole> {
        self.roles.values()
    }
}

fn normalize(id: &str) -> String {
    id.trim().to_lowercase()
}

fn builtin_roles() -> Vec<UIRole> {
    macro_rules! role {
        ($id:expr, $label:expr, $desc:expr, [$($alias:expr),* $(,)?], $aria:expr, $category:expr) => {
            UIRole {
                id: $id.to_string(),
                label: $label.to_string(),
                description: $desc.to_string(),
                aliases: vec![$($alias.to_string()),*],
                external_refs: BTreeMap::from([("aria-role".to_string(), $aria.to_string())]),
                category: $category,
            }
        };
    }

    vec![
        role!("button", "Button", "Clickable control that triggers an action.", ["push button", "btn"], "button", RoleCategory::Interactive),
        role!("link", "Link", "Navigational element that moves focus to another resource or view.", ["hyperlink"], "link", RoleCategory::Navigation),
        role!("menu", "Menu", "Container for a list of choices or commands.", ["menu bar", "context menu"], "menu", RoleCategory::Container),
        role!("menuitem", "Menu Item", "Choice within a menu that can be activated.", ["menu item"], "menuitem", RoleCategory::Interactive),
        role!("textbox", "Text Box", "Editable text input field.", ["text field", "input"], "textbox", RoleCategory::Input),
        role!("checkbox", "Checkbox", "Binary on/off option, typically square with a check mark.", ["check box"], "checkbox", RoleCategory::Input),
        role!("radiobutton", "Radio Button", "Single-choice option among a group of mutually exclusive options.", ["radio button", "radio"], "radio", RoleCategory::Input),
        role!("dialog", "Dialog", "Top-level window used to prompt the user for interaction.", ["dialog box"], "dialog", RoleCategory::Container),
        role!("alert", "Alert", "High-priority message that interrupts the user's workflow.", ["alert dialog"], "alert", RoleCategory::Feedback),
        role!("status", "Status", "Non-interruptive status or progress information.", ["status bar"], "status", RoleCategory::Feedback),
        role!("toolbar", "Toolbar", "Collection of commonly used controls grouped together.", ["tool bar"], "toolbar", RoleCategory::Container),
        role!("tab", "Tab", "Control used to switch between views in a tabbed interface.", ["tab header"], "tab", RoleCategory::Navigation),
        role!("tabpanel", "Tab Panel", "Container for the content associated with a tab.", ["tab panel"], "tabpanel", RoleCategory::Container),
        role!("list", "List", "Container for a linear list of items.", ["listbox"], "list", RoleCategory::Container),
        role!("listitem", "List Item", "Item within a list.", ["list item"], "listitem", RoleCategory::Structural),
        role!("table", "Table", "Grid of rows and columns for displaying data.", ["grid"], "table", RoleCategory::Container),
        role!("row", "Row", "Horizontal grouping of cells in a table.", ["table row"], "row", RoleCategory::Structural),
        role!("cell", "Cell", "Intersection of a row and column in a table.", ["table cell"], "cell", RoleCategory::Structural),
        role!("image", "Image", "Static image or icon.", ["img", "icon"], "img", RoleCategory::Other),
        role!("slider", "Slider", "Input control for choosing a value from a continuous or discrete range.", ["range slider"], "slider", RoleCategory::Input),
        role!("progressbar", "Progress Bar", "Visual indicator of task progress.", ["progress"], "progressbar", RoleCategory::Feedback),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_seed_twenty_one_roles() {
        let registry = RoleRegistry::with_builtins();
        assert_eq!(registry.all().count(), 21);
    }

    #[test]
    fn lookup_is_trimmed_and_case_insensitive() {
        let registry = RoleRegistry::with_builtins();
        assert!(registry.get(" Button ").is_some());
    }

    #[test]
    fn reregistering_identical_role_is_a_no_op() {
        let mut registry = RoleRegistry::with_builtins();
        let button = registry.get("button").unwrap().clone();
        assert!(registry.register(button).is_ok());
    }

    #[test]
    fn registering_conflicting_role_errors() {
        let mut registry = RoleRegistry::with_builtins();
        let conflict = UIRole {
            id: "button".to_string(),
            label: "Something else".to_string(),
            description: "different".to_string(),
            aliases: vec![],
            external_refs: BTreeMap::new(),
            category: RoleCategory::Other,
        };
        assert!(registry.register(conflict).is_err());
    }
}
