//! # CCF Auditor Base - Control Assessment Engine
//!
//! Records per-control assessments against a loaded catalog, scores them,
//! collects findings and synthesizes audit reports.

pub mod api;
pub mod assessment;
pub mod findings;
pub mod results;
pub mod types;

// Convenience re-exports
pub use api::*;

pub mod prelude {
    pub use crate::api::{Auditor, AuditorConfig, AuditError};

    pub use crate::assessment::{scoring, AssessmentStore};
    pub use crate::findings::FindingRegistry;
    pub use crate::results::{
        export_report, ExportedReport, MarkdownRenderer, Report, ReportError, ReportSynthesizer,
    };
    pub use crate::types::{Assessment, ComplianceStatus, Finding, Priority, ScopeDescriptor};

    pub use ccf_core::catalog::{Catalog, Control};
}
