//! Scanner errors
//!
//! Only setup failures are errors. Files that cannot be read during a scan
//! are recorded on the signals and skipped.

use ccf_core::logging::codes::{self, Code};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Scan root does not exist: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Scan root is not a directory: {path}")]
    RootNotDirectory { path: PathBuf },

    #[error("Pattern '{name}' failed to compile: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}

impl ScanError {
    pub fn invalid_pattern(name: &str, source: regex::Error) -> Self {
        Self::InvalidPattern {
            name: name.to_string(),
            source,
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::RootNotFound { .. } | Self::RootNotDirectory { .. } => {
                codes::scanner::SCAN_ROOT_INVALID
            }
            Self::InvalidPattern { .. } => codes::scanner::PATTERN_COMPILE_FAILED,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}
