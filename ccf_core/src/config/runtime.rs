// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether to enable console output (user preference)
    pub enable_console_logging: bool,

    /// User preferred minimum log level
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportPreferences {
    /// Framework name printed in the report narrative and footer
    pub framework_name: String,

    /// Tool name printed in the report footer
    pub tool_name: String,
}

impl Default for ReportPreferences {
    fn default() -> Self {
        Self {
            framework_name: env::var(env_vars::REPORT_FRAMEWORK_NAME)
                .unwrap_or_else(|_| DEFAULT_FRAMEWORK_NAME.to_string()),
            tool_name: env::var(env_vars::REPORT_TOOL_NAME)
                .unwrap_or_else(|_| DEFAULT_TOOL_NAME.to_string()),
        }
    }
}

pub const DEFAULT_FRAMEWORK_NAME: &str = "Common Controls Framework (CCF) v5";
pub const DEFAULT_TOOL_NAME: &str = "CCF Security Auditor";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Complete runtime preference set, loadable from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditorPreferences {
    pub logging: LoggingPreferences,
    pub report: ReportPreferences,
}

impl AuditorPreferences {
    /// Parse preferences from TOML text; missing keys fall back to env/defaults
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load preferences from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml_str(&content)
            .map_err(|e| format!("Invalid TOML in {}: {}", path.display(), e))
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "CCF_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "CCF_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "CCF_LOGGING_MIN_LEVEL";

    // Report
    pub const REPORT_FRAMEWORK_NAME: &str = "CCF_REPORT_FRAMEWORK_NAME";
    pub const REPORT_TOOL_NAME: &str = "CCF_REPORT_TOOL_NAME";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("1"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_preferences_from_toml() {
        let prefs = AuditorPreferences::from_toml_str(
            r#"
            [logging]
            use_structured_logging = true
            min_log_level = "debug"

            [report]
            framework_name = "Internal Baseline v1"
            "#,
        )
        .unwrap();

        assert!(prefs.logging.use_structured_logging);
        assert_eq!(prefs.logging.min_log_level, LogLevel::Debug);
        assert_eq!(prefs.report.framework_name, "Internal Baseline v1");
        assert!(!prefs.report.tool_name.is_empty());
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(AuditorPreferences::from_toml_str("[logging\nbroken").is_err());
    }
}
