//! Consolidated error codes and classification system
//!
//! Single source of truth for all log codes, their metadata, and classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a log code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Control catalog error codes
pub mod catalog {
    use super::Code;

    pub const CATALOG_READ_FAILED: Code = Code::new("E010");
    pub const CATALOG_PARSE_FAILED: Code = Code::new("E011");
    pub const CATALOG_TOO_LARGE: Code = Code::new("E012");
    pub const DUPLICATE_CONTROL: Code = Code::new("E013");
    pub const UNKNOWN_DOMAIN_MEMBER: Code = Code::new("E014");
}

/// Assessment store error codes
pub mod assessment {
    use super::Code;

    pub const UNKNOWN_CONTROL: Code = Code::new("E020");
    pub const SCOPE_ALREADY_SET: Code = Code::new("E021");
}

/// Report synthesis and export error codes
pub mod report {
    use super::Code;

    pub const SERIALIZATION_FAILED: Code = Code::new("E040");
    pub const EXPORT_FAILED: Code = Code::new("E041");
}

/// Automated scanner error codes
pub mod scanner {
    use super::Code;

    pub const SCAN_ROOT_INVALID: Code = Code::new("E050");
    pub const PATTERN_COMPILE_FAILED: Code = Code::new("E051");
}

/// Questionnaire error codes
pub mod questionnaire {
    use super::Code;

    pub const QUESTION_BANK_INVALID: Code = Code::new("E060");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const CATALOG_LOADED: Code = Code::new("I002");
    pub const ASSESSMENT_RECORDED: Code = Code::new("I003");
    pub const REPORT_GENERATED: Code = Code::new("I004");
    pub const SCAN_COMPLETED: Code = Code::new("I005");
    pub const REPORT_EXPORTED: Code = Code::new("I006");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                "Internal auditor error",
                "Report this issue with the log output attached",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                "Logging or configuration initialization failed",
                "Check CCF_* environment variables and the build profile",
            ),
            // Catalog
            ErrorMetadata::new(
                "E010",
                "Catalog",
                Severity::High,
                true,
                "Control catalog could not be read",
                "Verify the catalog path and file permissions",
            ),
            ErrorMetadata::new(
                "E011",
                "Catalog",
                Severity::High,
                true,
                "Control catalog is not valid JSON or has the wrong shape",
                "Regenerate the catalog export (controls, evidence, domains)",
            ),
            ErrorMetadata::new(
                "E012",
                "Catalog",
                Severity::Medium,
                true,
                "Control catalog exceeds the configured size limit",
                "Raise catalog limits in the build profile or trim the export",
            ),
            ErrorMetadata::new(
                "E013",
                "Catalog",
                Severity::High,
                true,
                "Control identifier appears more than once in the catalog",
                "Remove the duplicate control rows from the export",
            ),
            ErrorMetadata::new(
                "E014",
                "Catalog",
                Severity::Medium,
                true,
                "Domain index lists a control that is not in the catalog",
                "Rebuild the domain index from the control list",
            ),
            // Assessment
            ErrorMetadata::new(
                "E020",
                "Assessment",
                Severity::High,
                false,
                "Assessment recorded for a control that is not in the catalog",
                "Use a control identifier from the loaded catalog",
            ),
            ErrorMetadata::new(
                "E021",
                "Assessment",
                Severity::Medium,
                false,
                "Audit scope was already set for this session",
                "Start a new audit session to change the scope",
            ),
            // Report
            ErrorMetadata::new(
                "E040",
                "Report",
                Severity::High,
                true,
                "Structured report could not be serialized or parsed",
                "Check the report document for manual edits",
            ),
            ErrorMetadata::new(
                "E041",
                "Report",
                Severity::High,
                true,
                "Rendered report could not be written",
                "Check the output directory exists and is writable",
            ),
            // Scanner
            ErrorMetadata::new(
                "E050",
                "Scanner",
                Severity::High,
                true,
                "Scan root does not exist or is not a directory",
                "Pass the path of a source repository",
            ),
            ErrorMetadata::new(
                "E051",
                "Scanner",
                Severity::Critical,
                false,
                "Built-in scan pattern failed to compile",
                "Report this issue; pattern tables are part of the build",
            ),
            // Questionnaire
            ErrorMetadata::new(
                "E060",
                "Questionnaire",
                Severity::High,
                true,
                "Question bank could not be parsed",
                "Fix the question bank TOML document",
            ),
            // Success codes
            ErrorMetadata::new(
                "I001",
                "System",
                Severity::Low,
                true,
                "Logging system initialized",
                "Continue",
            ),
            ErrorMetadata::new(
                "I002",
                "Catalog",
                Severity::Low,
                true,
                "Control catalog loaded",
                "Continue to scoping",
            ),
            ErrorMetadata::new(
                "I003",
                "Assessment",
                Severity::Low,
                true,
                "Control assessment recorded",
                "Continue",
            ),
            ErrorMetadata::new(
                "I004",
                "Report",
                Severity::Low,
                true,
                "Audit report synthesized",
                "Render or export the report",
            ),
            ErrorMetadata::new(
                "I005",
                "Scanner",
                Severity::Low,
                true,
                "Source tree scan completed",
                "Apply evidence rules",
            ),
            ErrorMetadata::new(
                "I006",
                "Report",
                Severity::Low,
                true,
                "Report written to disk",
                "Review the exported documents",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_constant_has_metadata() {
        let all = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            catalog::CATALOG_READ_FAILED,
            catalog::CATALOG_PARSE_FAILED,
            catalog::CATALOG_TOO_LARGE,
            catalog::DUPLICATE_CONTROL,
            catalog::UNKNOWN_DOMAIN_MEMBER,
            assessment::UNKNOWN_CONTROL,
            assessment::SCOPE_ALREADY_SET,
            report::SERIALIZATION_FAILED,
            report::EXPORT_FAILED,
            scanner::SCAN_ROOT_INVALID,
            scanner::PATTERN_COMPILE_FAILED,
            questionnaire::QUESTION_BANK_INVALID,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::CATALOG_LOADED,
            success::ASSESSMENT_RECORDED,
            success::REPORT_GENERATED,
            success::SCAN_COMPLETED,
            success::REPORT_EXPORTED,
        ];

        for code in all {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "Missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_classification_fallbacks() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_category("X999"), "Unknown");
        assert_eq!(get_severity("X999"), Severity::Medium);
        assert!(is_recoverable("X999"));
    }

    #[test]
    fn test_unknown_control_is_fatal() {
        let code = assessment::UNKNOWN_CONTROL.as_str();
        assert!(!is_recoverable(code));
        assert_eq!(get_category(code), "Assessment");
    }
}
