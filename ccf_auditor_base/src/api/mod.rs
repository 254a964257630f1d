//! # Public API for the Auditor Base
//!
//! High-level session interface over the assessment engine.

pub mod auditor;
pub mod config;
pub mod errors;

pub use auditor::Auditor;
pub use config::AuditorConfig;
pub use errors::AuditError;

// Re-export commonly used types
pub use crate::results::{ExportedReport, MarkdownRenderer, Report, ReportError};
pub use crate::types::{Assessment, ComplianceStatus, Finding, Priority, ScopeDescriptor};
