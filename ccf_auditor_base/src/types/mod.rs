pub mod records;
pub mod scope;
pub mod status;

pub use records::{Assessment, Finding};
pub use scope::ScopeDescriptor;
pub use status::{ComplianceStatus, Priority};
