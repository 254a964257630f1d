//! Finding construction for gaps identified during an interview

use ccf_auditor_base::types::{ComplianceStatus, Finding, Priority};
use ccf_core::catalog::Control;

/// Domains whose gaps are raised one priority level
pub const HIGH_PRIORITY_DOMAINS: [&str; 4] = [
    "Identity and Access Management",
    "Data Management",
    "Cryptography",
    "Incident Response",
];

/// Domains whose non-compliance carries breach-level risk
pub const HIGH_RISK_DOMAINS: [&str; 3] = [
    "Identity and Access Management",
    "Data Management",
    "Cryptography",
];

const MAX_GUIDANCE_LENGTH: usize = 200;

/// Gap wording that signals a control is entirely absent
fn describes_absence(gap_description: &str) -> bool {
    gap_description
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word.eq_ignore_ascii_case("no") || word.eq_ignore_ascii_case("never"))
}

/// Priority from the domain and how the gap is described
pub fn gap_priority(domain: &str, gap_description: &str) -> Priority {
    let absent = describes_absence(gap_description);
    match (HIGH_PRIORITY_DOMAINS.contains(&domain), absent) {
        (true, true) => Priority::Critical,
        (true, false) | (false, true) => Priority::High,
        (false, false) => Priority::Medium,
    }
}

/// First sentence of the control's implementation guidance
pub fn recommendation_for(control: &Control) -> String {
    match control
        .implementation_guidance
        .as_deref()
        .map(str::trim)
        .filter(|guidance| !guidance.is_empty())
    {
        Some(guidance) => match guidance.split_once('.') {
            Some((first, _)) => format!("{}.", first),
            None if guidance.chars().count() > MAX_GUIDANCE_LENGTH => {
                let truncated: String = guidance.chars().take(MAX_GUIDANCE_LENGTH).collect();
                format!("{}...", truncated)
            }
            None => guidance.to_string(),
        },
        None => format!("Implement {} according to CCF guidelines.", control.name),
    }
}

pub fn risk_impact(domain: &str, status: ComplianceStatus) -> &'static str {
    let non_compliant = status == ComplianceStatus::NonCompliant;
    match (HIGH_RISK_DOMAINS.contains(&domain), non_compliant) {
        (true, true) => "High - Could lead to data breach or unauthorized access",
        (true, false) => "Medium - Increased risk of security incidents",
        (false, true) => "Medium - Could impact security posture",
        (false, false) => "Low - Minor security risk",
    }
}

pub fn remediation_effort(status: ComplianceStatus) -> &'static str {
    match status {
        ComplianceStatus::NonCompliant => "High - Significant implementation required",
        ComplianceStatus::Partial => "Medium - Enhancement of existing controls",
        _ => "Low - Minor adjustments needed",
    }
}

/// Build the finding raised for a gap on one control
pub fn finding_for_gap(
    finding_id: &str,
    domain: &str,
    control: &Control,
    status: ComplianceStatus,
    gap_description: &str,
) -> Finding {
    let description = if gap_description.trim().is_empty() {
        "Control not implemented"
    } else {
        gap_description
    };

    Finding::new(
        finding_id,
        &format!("{} - Gap Identified", control.name),
        description,
        gap_priority(domain, gap_description),
    )
    .with_affected_control(&control.id)
    .with_recommendation(&recommendation_for(control))
    .with_risk_impact(risk_impact(domain, status))
    .with_remediation_effort(remediation_effort(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_priority_matrix() {
        assert_eq!(
            gap_priority("Cryptography", "No key rotation at all"),
            Priority::Critical
        );
        assert_eq!(gap_priority("Cryptography", "Rotation is manual"), Priority::High);
        assert_eq!(gap_priority("Change Management", "Never reviewed"), Priority::High);
        assert_eq!(gap_priority("Change Management", "Reviews are late"), Priority::Medium);
    }

    #[test]
    fn test_absence_matches_whole_words() {
        assert_eq!(gap_priority("Change Management", "Not documented"), Priority::Medium);
        assert_eq!(gap_priority("Change Management", "Unknown owner"), Priority::Medium);
    }

    #[test]
    fn test_recommendation_from_guidance() {
        let control = Control::new("CR-03", "Cryptography", "Key Rotation", "")
            .with_implementation_guidance("Rotate keys yearly. Automate where possible.");
        assert_eq!(recommendation_for(&control), "Rotate keys yearly.");

        let long = Control::new("CR-03", "Cryptography", "Key Rotation", "")
            .with_implementation_guidance(&"x".repeat(250));
        let text = recommendation_for(&long);
        assert_eq!(text.len(), 203);
        assert!(text.ends_with("..."));

        let bare = Control::new("CR-03", "Cryptography", "Key Rotation", "");
        assert_eq!(
            recommendation_for(&bare),
            "Implement Key Rotation according to CCF guidelines."
        );
    }

    #[test]
    fn test_finding_for_gap() {
        let control = Control::new("IAM-05", "Identity and Access Management", "MFA", "");
        let finding = finding_for_gap(
            "F-02-01",
            "Identity and Access Management",
            &control,
            ComplianceStatus::NonCompliant,
            "No MFA on the admin console",
        );

        assert_eq!(finding.id, "F-02-01");
        assert_eq!(finding.title, "MFA - Gap Identified");
        assert_eq!(finding.priority, Priority::Critical);
        assert_eq!(finding.affected_controls, vec!["IAM-05".to_string()]);
        assert!(finding.risk_impact.starts_with("High"));
        assert!(finding.remediation_effort.starts_with("High"));
    }

    #[test]
    fn test_effort_by_status() {
        assert!(remediation_effort(ComplianceStatus::Partial).starts_with("Medium"));
        assert!(remediation_effort(ComplianceStatus::Compliant).starts_with("Low"));
    }
}
