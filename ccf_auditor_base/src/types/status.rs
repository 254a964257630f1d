//! Compliance status and finding priority enumerations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compliance status recorded for a single control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    Partial,
    NonCompliant,
    NotApplicable,
    NotAssessed,
}

impl ComplianceStatus {
    pub const ALL: [ComplianceStatus; 5] = [
        ComplianceStatus::Compliant,
        ComplianceStatus::Partial,
        ComplianceStatus::NonCompliant,
        ComplianceStatus::NotApplicable,
        ComplianceStatus::NotAssessed,
    ];

    /// Score contribution, or `None` when the status is excluded from scoring
    pub fn score(&self) -> Option<f64> {
        match self {
            ComplianceStatus::Compliant => Some(100.0),
            ComplianceStatus::Partial => Some(50.0),
            ComplianceStatus::NonCompliant => Some(0.0),
            ComplianceStatus::NotAssessed => Some(0.0),
            ComplianceStatus::NotApplicable => None,
        }
    }

    /// Score as stored on an assessment; excluded statuses store 0.0
    pub fn stored_score(&self) -> f64 {
        self.score().unwrap_or(0.0)
    }

    pub fn counts_toward_score(&self) -> bool {
        self.score().is_some()
    }

    /// Serialized tag, e.g. `non_compliant`
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::Partial => "partial",
            ComplianceStatus::NonCompliant => "non_compliant",
            ComplianceStatus::NotApplicable => "not_applicable",
            ComplianceStatus::NotAssessed => "not_assessed",
        }
    }

    /// Human-readable label, e.g. `Non Compliant`
    pub fn label(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "Compliant",
            ComplianceStatus::Partial => "Partial",
            ComplianceStatus::NonCompliant => "Non Compliant",
            ComplianceStatus::NotApplicable => "Not Applicable",
            ComplianceStatus::NotAssessed => "Not Assessed",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "✓",
            ComplianceStatus::Partial => "◐",
            ComplianceStatus::NonCompliant => "✗",
            ComplianceStatus::NotApplicable => "—",
            ComplianceStatus::NotAssessed => "?",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Priority of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Priority {
    /// Priorities that appear in rendered findings and recommendations, in order.
    /// Info is never rendered.
    pub const RENDERED: [Priority; 4] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Info => "info",
        }
    }

    /// Upper-case label used in report headings
    pub fn heading(&self) -> &'static str {
        match self {
            Priority::Critical => "CRITICAL",
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
            Priority::Info => "INFO",
        }
    }

    /// Remediation time frame attached to the recommendation band
    pub fn time_frame(&self) -> Option<&'static str> {
        match self {
            Priority::Critical => Some("Immediate Action Required"),
            Priority::High => Some("Address within 30 days"),
            Priority::Medium => Some("Address within 90 days"),
            Priority::Low => Some("Address within 6 months"),
            Priority::Info => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        assert_eq!(ComplianceStatus::Compliant.score(), Some(100.0));
        assert_eq!(ComplianceStatus::Partial.score(), Some(50.0));
        assert_eq!(ComplianceStatus::NonCompliant.score(), Some(0.0));
        assert_eq!(ComplianceStatus::NotAssessed.score(), Some(0.0));
        assert_eq!(ComplianceStatus::NotApplicable.score(), None);
        assert_eq!(ComplianceStatus::NotApplicable.stored_score(), 0.0);
        assert!(!ComplianceStatus::NotApplicable.counts_toward_score());
    }

    #[test]
    fn test_serialized_tags_match_as_str() {
        for status in ComplianceStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert_eq!(serde_json::to_string(&Priority::Critical).unwrap(), "\"critical\"");
    }

    #[test]
    fn test_info_has_no_band() {
        assert!(Priority::Info.time_frame().is_none());
        assert!(!Priority::RENDERED.contains(&Priority::Info));
    }
}
