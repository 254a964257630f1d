//! # CCF Auditor SDK
//!
//! Evidence producers for the assessment engine: an automated source
//! repository scanner and an interactive questionnaire, plus the command
//! line surface that drives them.

pub mod cli;
pub mod questionnaire;
pub mod scanner;

pub mod prelude {
    pub use crate::questionnaire::{Interview, InterviewError, QuestionBank, ReviewSummary};
    pub use crate::scanner::{
        apply_rules, default_rules, repository_scope, scan_repository, ScanError, ScanOutcome,
        ScanSignals, SourceCollector,
    };

    pub use ccf_auditor_base::prelude::*;
}
