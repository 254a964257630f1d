//! Control catalog: the fixed, read-only set of security controls an audit
//! is measured against, loaded from its JSON export.

pub mod error;
pub mod loader;
pub mod types;

pub use error::{CatalogError, CatalogResult};
pub use types::{Catalog, CatalogBuilder, CatalogDocument, CatalogStatistics, Control, EvidenceItem};
