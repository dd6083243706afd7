//! In-memory, context-partitioned graph store for Atlas.
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod store;

pub use config::GraphStoreConfig;
pub use store::GraphStore;
