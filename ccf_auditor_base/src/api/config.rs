//! # Auditor Configuration

use ccf_core::config::ReportPreferences;

/// Configuration for an audit session
///
/// Controls report labelling and advisory checks.
#[derive(Debug, Clone)]
pub struct AuditorConfig {
    /// Framework name used in the narrative and footer
    pub framework_name: String,

    /// Tool name used in the report footer
    pub tool_name: String,

    /// Log a warning when a finding references a control outside the catalog
    pub warn_on_dangling_references: bool,
}

impl Default for AuditorConfig {
    fn default() -> Self {
        Self::from_preferences(&ReportPreferences::default())
    }
}

impl AuditorConfig {
    pub fn from_preferences(preferences: &ReportPreferences) -> Self {
        Self {
            framework_name: preferences.framework_name.clone(),
            tool_name: preferences.tool_name.clone(),
            warn_on_dangling_references: true,
        }
    }

    pub fn with_framework_name(mut self, name: impl Into<String>) -> Self {
        self.framework_name = name.into();
        self
    }

    pub fn with_tool_name(mut self, name: impl Into<String>) -> Self {
        self.tool_name = name.into();
        self
    }

    /// Skip the dangling-reference warning on `add_finding`
    pub fn without_reference_warnings(mut self) -> Self {
        self.warn_on_dangling_references = false;
        self
    }
}
