// results/error.rs

use ccf_core::logging::codes::{self, Code};
use std::path::PathBuf;

/// Report serialization and export errors
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write report '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::Serialization(_) => codes::report::SERIALIZATION_FAILED,
            Self::Write { .. } => codes::report::EXPORT_FAILED,
        }
    }
}
