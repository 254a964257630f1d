//! Global logging module for the CCF auditor
//!
//! Provides thread-safe global logging with coded events and a clean macro
//! interface. Logging is a no-op until one of the `init_*` functions runs.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use crate::config::runtime::LoggingPreferences;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{
    ConsoleLogger, Logger, LoggingService, MemoryLogger, SilentLogger, StructuredLogger,
};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

/// Initialize global logging from environment-derived preferences
pub fn init_global_logging() -> Result<(), String> {
    install(Arc::new(LoggingService::with_config()))
}

/// Initialize global logging with explicit preferences
pub fn init_global_logging_with_preferences(
    preferences: LoggingPreferences,
) -> Result<(), String> {
    config::init_runtime_preferences(preferences)?;
    init_global_logging()
}

/// Initialize with custom service (primarily for testing)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

fn install(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

fn emit(mut event: LogEvent, context: Vec<(&str, &str)>) {
    for (key, value) in context {
        event = event.with_context(key, value);
    }

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    emit(LogEvent::error(code, message), context);
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    emit(LogEvent::success(code, message), context);
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    emit(LogEvent::info(message), context);
}

/// Safe error logging; falls back to stderr when uninitialized
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_logging_initialization() {
        if is_initialized() {
            return;
        }

        let logger = service::create_test_logger();
        let service = Arc::new(LoggingService::new(logger.clone(), LogLevel::Debug));
        if init_global_logging_with_service(service).is_ok() {
            crate::log_error!(codes::system::INTERNAL_ERROR, "boom", "stage" => "test");
            assert!(logger.has_error_with_code(codes::system::INTERNAL_ERROR));
        }
        assert!(is_initialized());
        assert!(init_global_logging().is_err());
    }

    #[test]
    fn test_safe_logging() {
        safe_log_error(codes::system::INTERNAL_ERROR, "Test error");
    }
}
