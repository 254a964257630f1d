//! # Audit Report Types
//!
//! Point-in-time report snapshot. A report owns copies of everything it
//! summarizes, so later changes to the audit session never alter it.

use crate::types::{Assessment, ComplianceStatus, Finding, Priority, ScopeDescriptor};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete audit report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Audit scope, if one was set
    pub scope: Option<ScopeDescriptor>,

    /// Generation timestamp
    pub assessment_date: DateTime<Utc>,

    /// Framework the controls come from
    pub framework: String,

    /// Tool that produced the report
    pub generated_by: String,

    pub assessments: Vec<Assessment>,

    pub findings: Vec<Finding>,

    /// Micro-average over all scored assessments
    pub overall_score: f64,

    pub domain_scores: BTreeMap<String, f64>,

    pub executive_summary: String,

    pub recommendations_summary: String,
}

impl Report {
    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize to compact JSON string
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// System name from the scope, or "the system" when no scope was set
    pub fn system_label(&self) -> &str {
        self.scope
            .as_ref()
            .map(|scope| scope.system_name.as_str())
            .unwrap_or("the system")
    }

    /// Timestamp as rendered in human-readable output
    pub fn formatted_date(&self) -> String {
        self.assessment_date.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    pub fn findings_with_priority(&self, priority: Priority) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|finding| finding.priority == priority)
            .collect()
    }

    pub fn count_with_status(&self, status: ComplianceStatus) -> usize {
        self.assessments
            .iter()
            .filter(|assessment| assessment.status == status)
            .count()
    }

    /// Assessments in one domain, sorted by control identifier
    pub fn assessments_in_domain(&self, domain: &str) -> Vec<&Assessment> {
        let mut assessments: Vec<&Assessment> = self
            .assessments
            .iter()
            .filter(|assessment| assessment.domain == domain)
            .collect();
        assessments.sort_by(|a, b| a.control_id.cmp(&b.control_id));
        assessments
    }
}
