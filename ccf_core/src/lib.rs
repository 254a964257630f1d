pub mod catalog;
pub mod config;
#[macro_use]
pub mod logging;

// Re-export key types for library consumers
pub use catalog::{Catalog, CatalogError, Control, EvidenceItem};
pub use config::AuditorPreferences;
