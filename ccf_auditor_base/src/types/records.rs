//! Assessment and finding records

use super::status::{ComplianceStatus, Priority};
use ccf_core::catalog::Control;
use serde::{Deserialize, Serialize};

/// Recorded compliance status and supporting evidence for one control.
///
/// Domain and control name are copied from the catalog when the assessment is
/// recorded; later catalog changes do not affect an existing assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    #[serde(rename = "ccf_id")]
    pub control_id: String,
    pub domain: String,
    pub control_name: String,
    pub status: ComplianceStatus,
    #[serde(default)]
    pub evidence: String,
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub notes: String,
    /// 0-100, fixed from the status at assessment time
    pub score: f64,
}

impl Assessment {
    pub fn for_control(
        control: &Control,
        status: ComplianceStatus,
        evidence: &str,
        gaps: Vec<String>,
        notes: &str,
    ) -> Self {
        Self {
            control_id: control.id.clone(),
            domain: control.domain.clone(),
            control_name: control.name.clone(),
            status,
            evidence: evidence.to_string(),
            gaps,
            notes: notes.to_string(),
            score: status.stored_score(),
        }
    }

    pub fn counts_toward_score(&self) -> bool {
        self.status.counts_toward_score()
    }
}

/// An independently tracked gap or issue.
///
/// Identifiers are caller-supplied and not checked for uniqueness. Affected
/// control identifiers are advisory and may name controls outside the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "finding_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub affected_controls: Vec<String>,
    pub priority: Priority,
    pub recommendation: String,
    pub risk_impact: String,
    /// high, medium, low
    pub remediation_effort: String,
}

impl Finding {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            affected_controls: Vec::new(),
            priority,
            recommendation: String::new(),
            risk_impact: String::new(),
            remediation_effort: String::new(),
        }
    }

    pub fn with_affected_control(mut self, control_id: impl Into<String>) -> Self {
        self.affected_controls.push(control_id.into());
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = recommendation.into();
        self
    }

    pub fn with_risk_impact(mut self, risk_impact: impl Into<String>) -> Self {
        self.risk_impact = risk_impact.into();
        self
    }

    pub fn with_remediation_effort(mut self, effort: impl Into<String>) -> Self {
        self.remediation_effort = effort.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessment_copies_catalog_fields() {
        let control = Control::new("CR-01", "Cryptography", "Key Management", "desc");
        let assessment = Assessment::for_control(
            &control,
            ComplianceStatus::Partial,
            "KMS in use",
            vec!["No rotation".to_string()],
            "",
        );

        assert_eq!(assessment.domain, "Cryptography");
        assert_eq!(assessment.control_name, "Key Management");
        assert_eq!(assessment.score, 50.0);
    }

    #[test]
    fn test_finding_serialized_field_names() {
        let finding = Finding::new("F-001", "Hardcoded secret", "desc", Priority::Critical)
            .with_affected_control("CR-02");
        let value = serde_json::to_value(&finding).unwrap();

        assert_eq!(value["finding_id"], "F-001");
        assert_eq!(value["priority"], "critical");
        assert_eq!(value["affected_controls"][0], "CR-02");
    }
}
