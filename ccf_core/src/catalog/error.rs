//! Catalog loading errors

use crate::logging::codes::{self, Code};
use std::path::PathBuf;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog file too large: {size} bytes (max: {max})")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Too many controls in catalog: {count} (max: {max})")]
    TooManyControls { count: usize, max: usize },

    #[error("Duplicate control identifier '{control_id}'")]
    DuplicateControl { control_id: String },

    #[error("Domain '{domain}' lists control '{control_id}' which is not in the catalog")]
    UnknownDomainMember { domain: String, control_id: String },
}

impl CatalogError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn duplicate_control(control_id: &str) -> Self {
        Self::DuplicateControl {
            control_id: control_id.to_string(),
        }
    }

    pub fn unknown_domain_member(domain: &str, control_id: &str) -> Self {
        Self::UnknownDomainMember {
            domain: domain.to_string(),
            control_id: control_id.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::Io { .. } => codes::catalog::CATALOG_READ_FAILED,
            Self::Parse(_) => codes::catalog::CATALOG_PARSE_FAILED,
            Self::FileTooLarge { .. } | Self::TooManyControls { .. } => {
                codes::catalog::CATALOG_TOO_LARGE
            }
            Self::DuplicateControl { .. } => codes::catalog::DUPLICATE_CONTROL,
            Self::UnknownDomainMember { .. } => codes::catalog::UNKNOWN_DOMAIN_MEMBER,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}
