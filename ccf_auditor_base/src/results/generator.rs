//! # Report Synthesizer
//!
//! Stateless composition of scope, assessments, scores and findings into a
//! report. Every call recomputes from the inputs; nothing is cached.

use crate::assessment::scoring;
use crate::results::Report;
use crate::types::{Assessment, ComplianceStatus, Finding, Priority, ScopeDescriptor};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Domains scoring strictly below this are candidates for "weakest domain"
pub const WEAK_DOMAIN_THRESHOLD: f64 = 60.0;

/// At most this many weakest domains are listed
pub const MAX_WEAKEST_DOMAINS: usize = 3;

/// Borrowed view of an audit session's state
#[derive(Debug, Clone, Copy)]
pub struct SynthesisInputs<'a> {
    pub scope: Option<&'a ScopeDescriptor>,
    pub assessments: &'a [Assessment],
    pub findings: &'a [Finding],
    /// Domains that always get a score entry, even when unassessed
    pub domains: &'a [String],
    pub framework: &'a str,
    pub generated_by: &'a str,
}

pub struct ReportSynthesizer;

impl ReportSynthesizer {
    /// Build a complete report snapshot
    pub fn synthesize(inputs: SynthesisInputs<'_>, timestamp: DateTime<Utc>) -> Report {
        let overall_score = scoring::overall_score(inputs.assessments);
        let domain_scores =
            scoring::domain_scores(inputs.assessments, inputs.domains.iter().map(String::as_str));

        let system_name = inputs
            .scope
            .map(|scope| scope.system_name.as_str())
            .unwrap_or("the system");

        let executive_summary = Self::executive_summary(
            overall_score,
            &domain_scores,
            inputs.findings,
            inputs.assessments,
            system_name,
            inputs.framework,
        );
        let recommendations_summary = Self::recommendations_summary(inputs.findings);

        Report {
            scope: inputs.scope.cloned(),
            assessment_date: timestamp,
            framework: inputs.framework.to_string(),
            generated_by: inputs.generated_by.to_string(),
            assessments: inputs.assessments.to_vec(),
            findings: inputs.findings.to_vec(),
            overall_score,
            domain_scores,
            executive_summary,
            recommendations_summary,
        }
    }

    /// Qualitative posture label for an overall score
    pub fn posture_label(overall_score: f64) -> &'static str {
        if overall_score >= 90.0 {
            "Excellent"
        } else if overall_score >= 75.0 {
            "Good"
        } else if overall_score >= 60.0 {
            "Fair"
        } else if overall_score >= 40.0 {
            "Poor"
        } else {
            "Critical"
        }
    }

    /// The three lowest-scoring domains (ties by name), kept only when below 60
    pub fn weakest_domains(domain_scores: &BTreeMap<String, f64>) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = domain_scores
            .iter()
            .map(|(domain, score)| (domain.as_str(), *score))
            .collect();
        // BTreeMap iteration is name-ordered and the sort is stable
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

        ranked
            .into_iter()
            .take(MAX_WEAKEST_DOMAINS)
            .filter(|(_, score)| *score < WEAK_DOMAIN_THRESHOLD)
            .collect()
    }

    /// Narrative executive summary.
    ///
    /// Finding counts cover Critical, High and Medium only.
    pub fn executive_summary(
        overall_score: f64,
        domain_scores: &BTreeMap<String, f64>,
        findings: &[Finding],
        assessments: &[Assessment],
        system_name: &str,
        framework: &str,
    ) -> String {
        let count_findings = |priority: Priority| {
            findings
                .iter()
                .filter(|finding| finding.priority == priority)
                .count()
        };
        let count_status = |status: ComplianceStatus| {
            assessments
                .iter()
                .filter(|assessment| assessment.status == status)
                .count()
        };

        let mut summary = format!(
            "**Overall Security Posture: {posture} ({score:.1}/100)**\n\
             \n\
             The security assessment of {system} has been completed based on the {framework}. \
             The system achieved an overall security score of {score:.1} out of 100.\n\
             \n\
             **Key Statistics:**\n\
             - Total Controls Assessed: {total}\n\
             - Compliant Controls: {compliant}\n\
             - Partially Compliant: {partial}\n\
             - Non-Compliant: {non_compliant}\n\
             \n\
             **Findings Summary:**\n\
             - Critical Priority: {critical}\n\
             - High Priority: {high}\n\
             - Medium Priority: {medium}\n",
            posture = Self::posture_label(overall_score),
            score = overall_score,
            system = system_name,
            framework = framework,
            total = assessments.len(),
            compliant = count_status(ComplianceStatus::Compliant),
            partial = count_status(ComplianceStatus::Partial),
            non_compliant = count_status(ComplianceStatus::NonCompliant),
            critical = count_findings(Priority::Critical),
            high = count_findings(Priority::High),
            medium = count_findings(Priority::Medium),
        );

        let weakest = Self::weakest_domains(domain_scores);
        if !weakest.is_empty() {
            summary.push_str("\n**Areas Requiring Immediate Attention:**\n");
            for (domain, score) in weakest {
                summary.push_str(&format!("- {} (Score: {:.1}/100)\n", domain, score));
            }
        }

        summary.trim().to_string()
    }

    /// Prioritized recommendations, banded by priority.
    ///
    /// Low entries render the title only. Info findings are never listed.
    pub fn recommendations_summary(findings: &[Finding]) -> String {
        let mut summary = String::from("**Prioritized Recommendations:**\n\n");

        for priority in Priority::RENDERED {
            let band: Vec<&Finding> = findings
                .iter()
                .filter(|finding| finding.priority == priority)
                .collect();
            if band.is_empty() {
                continue;
            }

            if let Some(time_frame) = priority.time_frame() {
                summary.push_str(&format!(
                    "**{} PRIORITY ({}):**\n",
                    priority.heading(),
                    time_frame
                ));
            }

            for (number, finding) in band.iter().enumerate() {
                summary.push_str(&format!("{}. {}\n", number + 1, finding.title));
                if priority != Priority::Low {
                    summary.push_str(&format!("   - {}\n", finding.recommendation));
                }
                summary.push('\n');
            }
        }

        summary.trim().to_string()
    }
}
