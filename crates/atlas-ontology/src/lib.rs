//! UI role/pattern vocabulary and semantic intent registry for Atlas.
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod intent;
mod intent_registry;
mod pattern;
mod pattern_registry;
mod registries;
mod role;
mod role_registry;

pub use intent::{Intent, IntentCategory};
pub use intent_registry::IntentRegistry;
pub use pattern::UIPattern;
pub use pattern_registry::PatternRegistry;
pub use registries::OntologyRegistries;
pub use role::{RoleCategory, UIRole};
pub use role_registry::RoleRegistry;
