//! # Audit Session Errors

use crate::results::ReportError;
use ccf_core::logging::codes::{self, Code};

/// Errors raised by an [`Auditor`](super::Auditor) session
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// Assessment recorded for a control the catalog does not contain
    #[error("Control '{control_id}' not found in catalog")]
    UnknownControl { control_id: String },

    /// Scope can only be set once per session
    #[error("Audit scope already set for '{system_name}'")]
    ScopeAlreadySet { system_name: String },

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

impl AuditError {
    pub fn unknown_control(control_id: &str) -> Self {
        Self::UnknownControl {
            control_id: control_id.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::UnknownControl { .. } => codes::assessment::UNKNOWN_CONTROL,
            Self::ScopeAlreadySet { .. } => codes::assessment::SCOPE_ALREADY_SET,
            Self::Report(e) => e.error_code(),
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::UnknownControl { control_id } => format!(
                "'{}' is not a control in the loaded catalog; check the identifier",
                control_id
            ),
            Self::ScopeAlreadySet { system_name } => format!(
                "This audit is already scoped to '{}'; start a new session to change it",
                system_name
            ),
            Self::Report(e) => format!("Could not produce the report: {}", e),
        }
    }
}
