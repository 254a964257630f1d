//! # Interactive Interview
//!
//! Drives scoping and per-domain questions over any line reader and writer,
//! recording assessments and gap findings on an [`Auditor`].

use super::bank::QuestionBank;
use super::gaps::finding_for_gap;
use super::interpret::interpret_response;
use ccf_auditor_base::api::{AuditError, Auditor};
use ccf_auditor_base::types::{ComplianceStatus, ScopeDescriptor};
use ccf_core::catalog::Catalog;
use ccf_core::{log_info, log_warning};
use std::io::{self, BufRead, Write};

/// Domains reviewed when the focused review is selected
pub const FOCUS_DOMAINS: [&str; 6] = [
    "Identity and Access Management",
    "Data Management",
    "Cryptography",
    "Application Security",
    "Vulnerability Management",
    "Incident Response",
];

const REVIEW_OPTIONS: [&str; 3] = [
    "Review all domains (comprehensive audit)",
    "Review specific domains",
    "Focus on high-priority domains",
];

#[derive(Debug, thiserror::Error)]
pub enum InterviewError {
    #[error("Interview I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Input ended before the interview finished")]
    InputClosed,

    #[error(transparent)]
    Audit(#[from] AuditError),
}

/// What the systematic review covered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewSummary {
    pub domains_reviewed: usize,
    pub questions_answered: usize,
    pub findings_added: usize,
    /// Control ids of questions skipped because the catalog lacks them
    pub skipped_questions: Vec<String>,
}

pub struct Interview<'a, R: BufRead, W: Write> {
    input: R,
    output: W,
    bank: &'a QuestionBank,
}

impl<'a, R: BufRead, W: Write> Interview<'a, R, W> {
    pub fn new(input: R, output: W, bank: &'a QuestionBank) -> Self {
        Self {
            input,
            output,
            bank,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Full session: scoping, confirmation, domain selection and review.
    ///
    /// Returns `None` when the user declines the review after scoping.
    pub fn run(&mut self, auditor: &mut Auditor) -> Result<Option<ReviewSummary>, InterviewError> {
        writeln!(self.output, "\n{}", "=".repeat(80))?;
        writeln!(self.output, "  CCF Security Auditor")?;
        writeln!(self.output, "  Comprehensive Security Assessment")?;
        writeln!(self.output, "{}\n", "=".repeat(80))?;

        let scope = self.conduct_scoping()?;
        auditor.set_scope(scope)?;

        let proceed = self.choose("Proceed with systematic review?", &["Yes", "No"])?;
        if proceed.to_lowercase().starts_with('n') {
            writeln!(self.output, "Audit cancelled.")?;
            return Ok(None);
        }

        let domains = self.select_domains(auditor.catalog())?;
        let summary = self.conduct_review(auditor, &domains)?;

        log_info!("Interview completed",
            "domains" => summary.domains_reviewed,
            "answers" => summary.questions_answered,
            "findings" => summary.findings_added
        );

        Ok(Some(summary))
    }

    /// Ask every scoping question and build the scope descriptor
    pub fn conduct_scoping(&mut self) -> Result<ScopeDescriptor, InterviewError> {
        self.section("Phase 1: Scoping & Information Gathering")?;

        let bank = self.bank;
        let mut scope = ScopeDescriptor::default();
        for question in bank.scoping_questions() {
            let answer = self.choose(&question.text, &question.options)?;
            question.field.apply(&mut scope, &answer);
        }

        writeln!(self.output, "\n✓ Scoping completed")?;
        writeln!(self.output, "\nAuditing: {}", scope.system_name)?;
        writeln!(self.output, "Architecture: {}", scope.architecture)?;
        writeln!(self.output, "Data Types: {}", scope.data_types.join(", "))?;
        writeln!(
            self.output,
            "Compliance: {}",
            scope.compliance_requirements.join(", ")
        )?;

        Ok(scope)
    }

    /// Let the user pick which catalog domains to review
    pub fn select_domains(&mut self, catalog: &Catalog) -> Result<Vec<String>, InterviewError> {
        self.section("Phase 2: Systematic Security Review")?;

        let domains: Vec<String> = catalog.domains().map(str::to_string).collect();
        writeln!(self.output, "Available Control Domains:")?;
        for (number, domain) in domains.iter().enumerate() {
            writeln!(
                self.output,
                "  {}. {} ({} controls)",
                number + 1,
                domain,
                catalog.controls_in_domain(domain).len()
            )?;
        }

        let choice = self.choose("Select review scope", &REVIEW_OPTIONS)?;
        let selected = match REVIEW_OPTIONS.iter().position(|option| *option == choice) {
            Some(1) => {
                let input = self.prompt("Enter domain numbers to review (comma-separated, e.g., 1,3,5)")?;
                match parse_numbers(&input) {
                    Some(numbers) => numbers
                        .into_iter()
                        .filter_map(|number| number.checked_sub(1))
                        .filter_map(|index| domains.get(index).cloned())
                        .collect(),
                    None => {
                        writeln!(self.output, "Invalid input. Reviewing all domains.")?;
                        domains
                    }
                }
            }
            Some(2) => domains
                .into_iter()
                .filter(|domain| FOCUS_DOMAINS.contains(&domain.as_str()))
                .collect(),
            _ => domains,
        };

        Ok(selected)
    }

    /// Ask the bank's questions for each domain and record the outcomes
    pub fn conduct_review(
        &mut self,
        auditor: &mut Auditor,
        domains: &[String],
    ) -> Result<ReviewSummary, InterviewError> {
        let bank = self.bank;
        let mut summary = ReviewSummary::default();

        for (domain_number, domain) in (1..).zip(domains) {
            self.section(&format!(
                "Domain {}/{}: {}",
                domain_number,
                domains.len(),
                domain
            ))?;

            let questions = bank.questions_for_domain(domain);
            if questions.is_empty() {
                writeln!(self.output, "No predefined questions for {}. Skipping...", domain)?;
                continue;
            }
            summary.domains_reviewed += 1;

            for (question_number, question) in (1..).zip(questions) {
                let control = match auditor.catalog().control(&question.control_id) {
                    Some(control) => control.clone(),
                    None => {
                        log_warning!("Question references a control outside the catalog",
                            "control_id" => &question.control_id,
                            "domain" => domain
                        );
                        summary.skipped_questions.push(question.control_id.clone());
                        continue;
                    }
                };

                writeln!(
                    self.output,
                    "\nQuestion {}/{}:",
                    question_number,
                    questions.len()
                )?;
                let answer = self.choose(&question.text, &question.options)?;
                let status = interpret_response(&answer, &question.options).status;

                let mut evidence = String::new();
                let mut gaps = Vec::new();
                if status != ComplianceStatus::Compliant {
                    evidence = self.prompt("  → Provide any supporting evidence or details (optional)")?;
                    if status == ComplianceStatus::NonCompliant {
                        let gap = self.prompt("  → Briefly describe the gap or issue")?;
                        if !gap.is_empty() {
                            gaps.push(gap);
                        }
                    }
                }

                let first_gap = gaps.first().cloned();
                auditor.record_assessment(
                    &control.id,
                    status,
                    &evidence,
                    gaps,
                    &format!("Based on: {}", question.text),
                )?;
                summary.questions_answered += 1;

                if let (ComplianceStatus::NonCompliant, Some(gap)) = (status, first_gap) {
                    let finding_id = format!("F-{:02}-{:02}", domain_number, question_number);
                    auditor.add_finding(finding_for_gap(
                        &finding_id,
                        domain,
                        &control,
                        status,
                        &gap,
                    ));
                    summary.findings_added += 1;
                }
            }

            writeln!(self.output, "\n✓ {} review completed", domain)?;
        }

        Ok(summary)
    }

    /// Present numbered options plus "Other" and return the chosen text.
    ///
    /// Numbers select an option, text matching an option selects it, anything
    /// else is returned as typed.
    pub fn choose<S: AsRef<str>>(
        &mut self,
        prompt: &str,
        options: &[S],
    ) -> Result<String, InterviewError> {
        if options.is_empty() {
            return self.prompt(prompt);
        }

        writeln!(self.output, "\n{}", prompt)?;
        for (number, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}. {}", number + 1, option.as_ref())?;
        }
        writeln!(self.output, "  {}. Other (specify)", options.len() + 1)?;
        write!(self.output, "\nYour choice (number or text): ")?;
        self.output.flush()?;

        let choice = self.read_line()?;
        if choice.is_empty() {
            return Ok(choice);
        }

        if let Ok(number) = choice.parse::<usize>() {
            if (1..=options.len()).contains(&number) {
                return Ok(options[number - 1].as_ref().to_string());
            }
            if number == options.len() + 1 {
                return self.prompt("Please specify");
            }
        }

        let lowered = choice.to_lowercase();
        let matched = options
            .iter()
            .find(|option| option.as_ref().to_lowercase().contains(&lowered));

        Ok(matched.map_or(choice, |option| option.as_ref().to_string()))
    }

    /// Free-text prompt
    pub fn prompt(&mut self, prompt: &str) -> Result<String, InterviewError> {
        write!(self.output, "{}: ", prompt)?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> Result<String, InterviewError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InterviewError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn section(&mut self, title: &str) -> Result<(), InterviewError> {
        writeln!(self.output, "\n{}", "-".repeat(80))?;
        writeln!(self.output, "  {}", title)?;
        writeln!(self.output, "{}\n", "-".repeat(80))?;
        Ok(())
    }
}

fn parse_numbers(input: &str) -> Option<Vec<usize>> {
    input
        .split(',')
        .map(|part| part.trim().parse::<usize>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use ccf_auditor_base::types::Priority;
    use ccf_core::catalog::Control;
    use std::sync::Arc;

    const BANK: &str = r#"
        [[scoping]]
        field = "system_name"
        text = "System name?"

        [[scoping]]
        field = "data_types"
        text = "Data types?"
        options = ["PII", "Public"]

        [[domain]]
        name = "Cryptography"

        [[domain.questions]]
        control_id = "CR-01"
        text = "Are cryptographic standards defined?"
        options = ["Yes, comprehensive policy", "Basic guidelines", "No standards"]

        [[domain.questions]]
        control_id = "CR-99"
        text = "Unknown control question?"
        options = ["Yes", "No"]
    "#;

    fn auditor() -> Auditor {
        Auditor::new(Arc::new(
            Catalog::builder()
                .control(Control::new("CR-01", "Cryptography", "Crypto Standards", ""))
                .control(Control::new(
                    "IAM-01",
                    "Identity and Access Management",
                    "Access Provisioning",
                    "",
                ))
                .build()
                .unwrap(),
        ))
    }

    fn bank() -> QuestionBank {
        QuestionBank::from_toml_str(BANK).unwrap()
    }

    #[test]
    fn test_full_interview_records_assessment_and_finding() {
        let bank = bank();
        let mut auditor = auditor();
        let input = "Payments API\nPII, Payment data\n1\n2\n1\n3\n\nNo standards exist\n";
        let mut interview = Interview::new(input.as_bytes(), Vec::new(), &bank);

        let summary = interview.run(&mut auditor).unwrap().unwrap();

        assert_eq!(summary.domains_reviewed, 1);
        assert_eq!(summary.questions_answered, 1);
        assert_eq!(summary.findings_added, 1);
        assert_eq!(summary.skipped_questions, vec!["CR-99".to_string()]);

        let scope = auditor.scope().unwrap();
        assert_eq!(scope.system_name, "Payments API");
        assert_eq!(scope.data_types, vec!["PII", "Payment data"]);

        let assessment = auditor.assessment("CR-01").unwrap();
        assert_eq!(assessment.status, ComplianceStatus::NonCompliant);
        assert_eq!(assessment.gaps, vec!["No standards exist".to_string()]);
        assert_eq!(assessment.notes, "Based on: Are cryptographic standards defined?");

        let finding = &auditor.findings()[0];
        assert_eq!(finding.id, "F-01-01");
        assert_eq!(finding.priority, Priority::Critical);
        assert_eq!(finding.affected_controls, vec!["CR-01".to_string()]);

        let transcript = String::from_utf8(interview.into_output()).unwrap();
        assert!(transcript.contains("Question 1/2:"));
        assert!(transcript.contains("Cryptography (1 controls)"));
    }

    #[test]
    fn test_partial_answer_has_no_finding() {
        let bank = bank();
        let mut auditor = auditor();
        let input = "Ledger\n2\nyes\n2\n1\nbasic\nSome docs\n";
        let mut interview = Interview::new(input.as_bytes(), Vec::new(), &bank);

        let summary = interview.run(&mut auditor).unwrap().unwrap();

        assert_eq!(summary.findings_added, 0);
        let assessment = auditor.assessment("CR-01").unwrap();
        assert_eq!(assessment.status, ComplianceStatus::Partial);
        assert_eq!(assessment.evidence, "Some docs");
        assert!(auditor.findings().is_empty());
    }

    #[test]
    fn test_declining_review_stops_after_scoping() {
        let bank = bank();
        let mut auditor = auditor();
        let mut interview = Interview::new("Ledger\n1\nNo\n".as_bytes(), Vec::new(), &bank);

        assert_eq!(interview.run(&mut auditor).unwrap(), None);
        assert!(auditor.scope().is_some());
        assert!(auditor.assessments().is_empty());
    }

    #[test]
    fn test_input_closed_mid_interview() {
        let bank = bank();
        let mut auditor = auditor();
        let mut interview = Interview::new("Ledger\n".as_bytes(), Vec::new(), &bank);

        assert_matches!(interview.run(&mut auditor), Err(InterviewError::InputClosed));
    }

    #[test]
    fn test_choose_other_and_text_match() {
        let bank = bank();
        let options = ["AWS", "Azure", "GCP"];

        let mut other = Interview::new("4\nOracle Cloud\n".as_bytes(), Vec::new(), &bank);
        assert_eq!(other.choose("Where?", &options).unwrap(), "Oracle Cloud");

        let mut text = Interview::new("azu\n".as_bytes(), Vec::new(), &bank);
        assert_eq!(text.choose("Where?", &options).unwrap(), "Azure");

        let mut free = Interview::new("Bare metal\n".as_bytes(), Vec::new(), &bank);
        assert_eq!(free.choose("Where?", &options).unwrap(), "Bare metal");
    }

    #[test]
    fn test_focus_selection_filters_catalog_domains() {
        let bank = bank();
        let catalog = Catalog::builder()
            .control(Control::new("CR-01", "Cryptography", "Standards", ""))
            .control(Control::new("CHM-01", "Change Management", "Changes", ""))
            .build()
            .unwrap();
        let mut interview = Interview::new("3\n".as_bytes(), Vec::new(), &bank);

        let domains = interview.select_domains(&catalog).unwrap();
        assert_eq!(domains, vec!["Cryptography".to_string()]);
    }

    #[test]
    fn test_invalid_domain_numbers_fall_back_to_all() {
        let bank = bank();
        let catalog = Catalog::builder()
            .control(Control::new("CR-01", "Cryptography", "Standards", ""))
            .control(Control::new("CHM-01", "Change Management", "Changes", ""))
            .build()
            .unwrap();
        let mut interview = Interview::new("2\none,two\n".as_bytes(), Vec::new(), &bank);

        let domains = interview.select_domains(&catalog).unwrap();
        assert_eq!(domains.len(), 2);
    }
}
