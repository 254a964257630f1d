//! Configuration module for the CCF auditor
//! Compile-time limits are generated from TOML configuration by build.rs

// Include generated constants from build.rs
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{AuditorPreferences, LogLevel, LoggingPreferences, ReportPreferences};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("CCF_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("CCF_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time;
    use super::*;

    #[test]
    fn test_generated_limits_are_sane() {
        assert!(compile_time::scanner::MAX_REPORTED_MATCHES >= 1);
        assert!(compile_time::scanner::MAX_EXCERPT_LENGTH > 0);
        assert!(compile_time::catalog::MAX_CONTROLS > 0);
        assert!(compile_time::logging::MAX_LOG_MESSAGE_LENGTH > 0);
    }

    #[test]
    fn test_source_info() {
        let info = build_info::source_info();
        assert!(info.starts_with("Generated from"));
        assert!(info.ends_with(".toml"));
    }
}
