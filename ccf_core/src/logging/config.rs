//! Logging configuration
//!
//! Combines compile-time floors with runtime user preferences. The compile-time
//! floor cannot be lowered at runtime.

use crate::config::compile_time::logging::SECURITY_MIN_LOG_LEVEL;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Initialize runtime preferences. Can only be done once per process.
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

/// Get minimum log level (user preference, never below the compile-time floor)
pub fn get_min_log_level() -> EventsLogLevel {
    let user_level = get_runtime_preferences().min_log_level.to_events_log_level();
    user_level.max(get_floor_log_level())
}

/// Level that is always emitted regardless of user preference
pub fn get_floor_log_level() -> EventsLogLevel {
    match SECURITY_MIN_LOG_LEVEL {
        0 => EventsLogLevel::Error,
        1 => EventsLogLevel::Warning,
        _ => EventsLogLevel::Info,
    }
}

pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_level_respects_floor() {
        assert!(get_min_log_level() >= get_floor_log_level());
    }

    #[test]
    fn test_floor_keeps_errors() {
        assert!(get_floor_log_level() >= EventsLogLevel::Error);
    }
}
