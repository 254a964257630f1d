//! Long-form Markdown rendering of a report

use crate::results::Report;
use crate::types::{Assessment, Finding, Priority, ScopeDescriptor};
use std::fmt::Write;

const NOT_SPECIFIED: &str = "Not specified";

/// Status annotation for a domain score row
pub fn domain_status_label(score: f64) -> &'static str {
    if score >= 70.0 {
        "✓ Good"
    } else if score >= 40.0 {
        "⚠ Needs Attention"
    } else {
        "✗ Critical"
    }
}

pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Render the full report. Output depends only on the report contents.
    pub fn render(report: &Report) -> String {
        let mut md = String::new();

        let _ = writeln!(md, "# Security Audit Report");
        let _ = writeln!(md, "**{} Assessment**\n", report.framework);
        md.push_str("---\n\n");

        Self::render_system_information(&mut md, report);
        md.push_str("---\n\n");

        md.push_str("## Executive Summary\n\n");
        md.push_str(&report.executive_summary);
        md.push_str("\n\n---\n\n");

        Self::render_domain_table(&mut md, report);
        let _ = writeln!(
            md,
            "\n**Overall Score: {:.1}/100**\n\n---\n",
            report.overall_score
        );

        Self::render_findings(&mut md, report);

        md.push_str("## Recommendations\n\n");
        md.push_str(&report.recommendations_summary);
        md.push_str("\n\n---\n\n");

        Self::render_detailed_assessments(&mut md, report);
        Self::render_footer(&mut md, report);

        md
    }

    fn render_system_information(md: &mut String, report: &Report) {
        md.push_str("## System Information\n\n");

        let default_scope = ScopeDescriptor::default();
        let scope = report.scope.as_ref().unwrap_or(&default_scope);
        let or_unspecified = |value: &str| {
            if value.trim().is_empty() {
                NOT_SPECIFIED.to_string()
            } else {
                value.to_string()
            }
        };

        let _ = writeln!(md, "**System Name:** {}  ", or_unspecified(&scope.system_name));
        let _ = writeln!(md, "**Assessment Date:** {}  ", report.formatted_date());
        let _ = writeln!(md, "**Primary Function:** {}  ", or_unspecified(&scope.primary_function));
        let _ = writeln!(md, "**Architecture:** {}  ", or_unspecified(&scope.architecture));
        let _ = writeln!(
            md,
            "**Deployment Environment:** {}  ",
            or_unspecified(&scope.deployment_environment)
        );
        let _ = writeln!(md, "**Data Types:** {}  ", or_unspecified(&scope.data_types.join(", ")));
        let _ = writeln!(
            md,
            "**Compliance Requirements:** {}  ",
            or_unspecified(&scope.compliance_requirements.join(", "))
        );
        let _ = writeln!(md, "**User Base:** {}  ", or_unspecified(&scope.user_base));
        let _ = writeln!(md, "**Criticality:** {}", or_unspecified(&scope.criticality));

        if !scope.additional_context.trim().is_empty() {
            let _ = writeln!(md, "\n**Additional Context:** {}", scope.additional_context);
        }
        md.push('\n');
    }

    fn render_domain_table(md: &mut String, report: &Report) {
        md.push_str("## Security Score by Domain\n\n");
        md.push_str("| Domain | Score | Status |\n");
        md.push_str("|--------|-------|--------|\n");

        for (domain, score) in &report.domain_scores {
            let _ = writeln!(
                md,
                "| {} | {:.1}/100 | {} |",
                domain,
                score,
                domain_status_label(*score)
            );
        }
    }

    fn render_findings(md: &mut String, report: &Report) {
        md.push_str("## Key Findings and Gaps\n\n");

        for priority in Priority::RENDERED {
            let findings = report.findings_with_priority(priority);
            if findings.is_empty() {
                continue;
            }

            let _ = writeln!(md, "### {} Priority\n", priority.heading());
            for finding in findings {
                Self::render_finding(md, finding);
            }
        }
    }

    fn render_finding(md: &mut String, finding: &Finding) {
        let _ = writeln!(md, "#### {}\n", finding.title);
        let _ = writeln!(md, "**Description:** {}\n", finding.description);
        let _ = writeln!(
            md,
            "**Affected Controls:** {}\n",
            finding.affected_controls.join(", ")
        );
        let _ = writeln!(md, "**Risk Impact:** {}\n", finding.risk_impact);
        let _ = writeln!(md, "**Remediation Effort:** {}\n", finding.remediation_effort);
        let _ = writeln!(md, "**Recommendation:** {}\n", finding.recommendation);
        md.push_str("---\n\n");
    }

    fn render_detailed_assessments(md: &mut String, report: &Report) {
        md.push_str("## Detailed Control Assessment\n\n");

        for (domain, score) in &report.domain_scores {
            let assessments = report.assessments_in_domain(domain);
            if assessments.is_empty() {
                continue;
            }

            let _ = writeln!(md, "### {}\n", domain);
            let _ = writeln!(md, "**Domain Score:** {:.1}/100\n", score);

            for assessment in assessments {
                Self::render_assessment(md, assessment);
            }
        }
    }

    fn render_assessment(md: &mut String, assessment: &Assessment) {
        let _ = writeln!(
            md,
            "#### {} {}: {}\n",
            assessment.status.glyph(),
            assessment.control_id,
            assessment.control_name
        );
        let _ = writeln!(md, "**Status:** {}\n", assessment.status.label());

        if !assessment.evidence.is_empty() {
            let _ = writeln!(md, "**Evidence:** {}\n", assessment.evidence);
        }

        if !assessment.gaps.is_empty() {
            md.push_str("**Identified Gaps:**\n");
            for gap in &assessment.gaps {
                let _ = writeln!(md, "- {}", gap);
            }
            md.push('\n');
        }

        if !assessment.notes.is_empty() {
            let _ = writeln!(md, "**Notes:** {}\n", assessment.notes);
        }

        md.push_str("---\n\n");
    }

    fn render_footer(md: &mut String, report: &Report) {
        md.push_str("## Report Information\n\n");
        let _ = writeln!(md, "**Generated:** {}  ", report.formatted_date());
        let _ = writeln!(md, "**Framework:** {}  ", report.framework);
        let _ = writeln!(md, "**Auditor:** {}\n", report.generated_by);
        md.push_str("---\n\n");
        let _ = writeln!(
            md,
            "*This report provides a preliminary security assessment based on the {}. \
             It should be used as a guide for improving security posture and achieving \
             compliance with industry standards.*",
            report.framework
        );
    }
}
