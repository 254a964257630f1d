//! # Evidence Rules
//!
//! Declarative mapping from scan signals to control assessments and findings.
//! Each rule lists outcomes in order; the first whose condition holds is
//! applied. A rule with no matching outcome leaves its control unassessed.

use super::patterns::SignalCategory;
use super::signals::ScanSignals;
use ccf_auditor_base::api::{AuditError, Auditor};
use ccf_auditor_base::types::{ComplianceStatus, Finding, Priority};
use ccf_core::log_warning;

/// Placeholder replaced by the condition's match count
const COUNT_PLACEHOLDER: &str = "{count}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// At least one match in the category
    Present(SignalCategory),
    /// README or architecture documents exist
    Documentation,
    /// Always holds
    Otherwise,
}

impl Condition {
    pub fn holds(&self, signals: &ScanSignals) -> bool {
        match self {
            Condition::Present(category) => signals.has(*category),
            Condition::Documentation => signals.has_documentation(),
            Condition::Otherwise => true,
        }
    }

    fn count(&self, signals: &ScanSignals) -> usize {
        match self {
            Condition::Present(category) => signals.count(*category),
            Condition::Documentation => signals.documentation_files.len(),
            Condition::Otherwise => 0,
        }
    }
}

/// Finding raised alongside an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindingTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleOutcome {
    pub when: Condition,
    pub status: ComplianceStatus,
    pub evidence: Option<&'static str>,
    pub gap: Option<&'static str>,
    pub finding: Option<FindingTemplate>,
}

impl RuleOutcome {
    const fn new(when: Condition, status: ComplianceStatus) -> Self {
        Self {
            when,
            status,
            evidence: None,
            gap: None,
            finding: None,
        }
    }

    const fn evidence(mut self, text: &'static str) -> Self {
        self.evidence = Some(text);
        self
    }

    const fn gap(mut self, text: &'static str) -> Self {
        self.gap = Some(text);
        self
    }

    const fn finding(
        mut self,
        title: &'static str,
        description: &'static str,
        priority: Priority,
    ) -> Self {
        self.finding = Some(FindingTemplate {
            title,
            description,
            priority,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceRule {
    pub control_id: &'static str,
    pub outcomes: Vec<RuleOutcome>,
}

impl EvidenceRule {
    pub fn new(control_id: &'static str, outcomes: Vec<RuleOutcome>) -> Self {
        Self {
            control_id,
            outcomes,
        }
    }

    /// First outcome whose condition holds
    pub fn evaluate(&self, signals: &ScanSignals) -> Option<&RuleOutcome> {
        self.outcomes.iter().find(|outcome| outcome.when.holds(signals))
    }
}

/// The built-in rule table
pub fn default_rules() -> Vec<EvidenceRule> {
    use ComplianceStatus::{Compliant, NonCompliant, Partial};
    use SignalCategory::*;

    vec![
        EvidenceRule::new(
            "AM-01",
            vec![
                RuleOutcome::new(Condition::Documentation, Compliant)
                    .evidence("Documentation found"),
                RuleOutcome::new(Condition::Otherwise, NonCompliant)
                    .gap("No system documentation found")
                    .finding(
                        "Missing System Documentation",
                        "No README or architecture documentation found",
                        Priority::Medium,
                    ),
            ],
        ),
        EvidenceRule::new(
            "IAM-05",
            vec![
                RuleOutcome::new(Condition::Present(AuthenticationIssue), NonCompliant)
                    .gap("Found {count} authentication issues")
                    .finding(
                        "Authentication Issues Detected",
                        "Hardcoded credentials or weak authentication found",
                        Priority::Critical,
                    ),
                RuleOutcome::new(Condition::Present(MfaIndicator), Compliant)
                    .evidence("MFA implementation found"),
                RuleOutcome::new(Condition::Otherwise, Partial)
                    .evidence("Basic authentication present, MFA not detected"),
            ],
        ),
        EvidenceRule::new(
            "CR-04",
            vec![
                RuleOutcome::new(Condition::Present(WeakCrypto), NonCompliant)
                    .gap("Found {count} weak cryptography instances")
                    .finding(
                        "Weak Cryptography Detected",
                        "MD5, SHA1, DES, or RC4 usage found",
                        Priority::High,
                    ),
                RuleOutcome::new(Condition::Present(StrongCrypto), Compliant)
                    .evidence("Strong cryptography algorithms in use"),
            ],
        ),
        EvidenceRule::new(
            "DM-10",
            vec![
                RuleOutcome::new(Condition::Present(TransportEncryption), Compliant)
                    .evidence("HTTPS/TLS usage detected"),
                RuleOutcome::new(Condition::Otherwise, NonCompliant)
                    .gap("No encryption in transit detected")
                    .finding(
                        "Missing Encryption in Transit",
                        "HTTPS/TLS not detected in code",
                        Priority::High,
                    ),
            ],
        ),
        EvidenceRule::new(
            "CR-02",
            vec![RuleOutcome::new(Condition::Present(Secret), NonCompliant)
                .gap("Found {count} hardcoded secrets")
                .finding(
                    "Hardcoded Secrets Detected",
                    "Found {count} potential secrets in code",
                    Priority::Critical,
                )],
        ),
        EvidenceRule::new(
            "SM-01",
            vec![
                RuleOutcome::new(Condition::Present(AuditLogging), Compliant)
                    .evidence("Audit logging detected"),
                RuleOutcome::new(Condition::Present(Logging), Partial)
                    .evidence("Basic logging present, audit logging not detected"),
                RuleOutcome::new(Condition::Otherwise, NonCompliant).gap("No logging detected"),
            ],
        ),
        EvidenceRule::new(
            "DM-11",
            vec![RuleOutcome::new(Condition::Present(SqlInjection), NonCompliant)
                .gap("SQL injection risks detected")
                .finding(
                    "SQL Injection Risk",
                    "Found {count} potential SQL injection vulnerabilities",
                    Priority::Critical,
                )],
        ),
    ]
}

/// What applying the rule table did to an auditor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleApplication {
    /// Controls assessed, in rule order
    pub assessed: Vec<String>,
    pub findings_added: usize,
    /// Rules skipped because the catalog lacks their control
    pub skipped_rules: Vec<String>,
}

fn fill(template: &str, count: usize) -> String {
    template.replace(COUNT_PLACEHOLDER, &count.to_string())
}

/// Apply rules to an auditor.
///
/// Findings get sequential `F-NNN` ids continuing from the auditor's
/// existing finding count.
pub fn apply_rules(
    auditor: &mut Auditor,
    rules: &[EvidenceRule],
    signals: &ScanSignals,
) -> Result<RuleApplication, AuditError> {
    let mut application = RuleApplication::default();

    for rule in rules {
        if !auditor.catalog().contains(rule.control_id) {
            log_warning!("Evidence rule skipped, control not in catalog",
                "control_id" => rule.control_id
            );
            application.skipped_rules.push(rule.control_id.to_string());
            continue;
        }

        let outcome = match rule.evaluate(signals) {
            Some(outcome) => outcome,
            None => continue,
        };
        let count = outcome.when.count(signals);

        let evidence = outcome.evidence.map(|text| fill(text, count)).unwrap_or_default();
        let gaps: Vec<String> = outcome.gap.map(|text| fill(text, count)).into_iter().collect();

        auditor.record_assessment(rule.control_id, outcome.status, &evidence, gaps, "")?;
        application.assessed.push(rule.control_id.to_string());

        if let Some(template) = outcome.finding {
            let finding_id = format!("F-{:03}", auditor.findings().len() + 1);
            auditor.add_finding(
                Finding::new(
                    finding_id,
                    template.title,
                    fill(template.description, count),
                    template.priority,
                )
                .with_affected_control(rule.control_id)
                .with_recommendation(format!(
                    "Review and remediate {}: {}",
                    rule.control_id, template.title
                ))
                .with_risk_impact("See control description for impact")
                .with_remediation_effort("Medium"),
            );
            application.findings_added += 1;
        }
    }

    Ok(application)
}
