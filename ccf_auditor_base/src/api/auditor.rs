//! # Audit Session
//!
//! [`Auditor`] owns one audit session: scope, assessment store and finding
//! registry, measured against a shared read-only catalog. It is single-owner
//! and unsynchronized; `clone()` gives a point-in-time copy.

use super::{AuditError, AuditorConfig};
use crate::assessment::{scoring, AssessmentStore};
use crate::findings::FindingRegistry;
use crate::results::{self, ExportedReport, Report, ReportSynthesizer, SynthesisInputs};
use crate::types::{Assessment, ComplianceStatus, Finding, ScopeDescriptor};
use ccf_core::catalog::Catalog;
use ccf_core::logging::codes;
use ccf_core::{log_debug, log_error, log_success, log_warning};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Auditor {
    catalog: Arc<Catalog>,
    config: AuditorConfig,
    scope: Option<ScopeDescriptor>,
    store: AssessmentStore,
    findings: FindingRegistry,
}

impl Auditor {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_config(catalog, AuditorConfig::default())
    }

    pub fn with_config(catalog: Arc<Catalog>, config: AuditorConfig) -> Self {
        Self {
            catalog,
            config,
            scope: None,
            store: AssessmentStore::new(),
            findings: FindingRegistry::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &AuditorConfig {
        &self.config
    }

    /// Set the audit scope. Can only be done once per session.
    pub fn set_scope(&mut self, scope: ScopeDescriptor) -> Result<(), AuditError> {
        if let Some(existing) = &self.scope {
            let err = AuditError::ScopeAlreadySet {
                system_name: existing.system_name.clone(),
            };
            log_error!(err.error_code(), &err.to_string());
            return Err(err);
        }

        log_debug!("Audit scope set", "system" => &scope.system_name);
        self.scope = Some(scope);
        Ok(())
    }

    pub fn scope(&self) -> Option<&ScopeDescriptor> {
        self.scope.as_ref()
    }

    /// Record the assessment of one control, replacing any earlier one.
    ///
    /// Domain and control name are copied from the catalog now.
    pub fn record_assessment(
        &mut self,
        control_id: &str,
        status: ComplianceStatus,
        evidence: &str,
        gaps: Vec<String>,
        notes: &str,
    ) -> Result<Assessment, AuditError> {
        let control = match self.catalog.control(control_id) {
            Some(control) => control,
            None => {
                let err = AuditError::unknown_control(control_id);
                log_error!(err.error_code(), &err.to_string(), "control_id" => control_id);
                return Err(err);
            }
        };

        let assessment = Assessment::for_control(control, status, evidence, gaps, notes);
        let (stored, replaced) = self.store.upsert(assessment);

        log_success!(codes::success::ASSESSMENT_RECORDED, "Control assessed",
            "control_id" => &stored.control_id,
            "status" => stored.status.as_str(),
            "replaced" => replaced
        );

        Ok(stored.clone())
    }

    pub fn assessment(&self, control_id: &str) -> Option<&Assessment> {
        self.store.get(control_id)
    }

    /// Assessments in first-recorded order
    pub fn assessments(&self) -> &[Assessment] {
        self.store.as_slice()
    }

    /// Append a finding. Never rejected; unknown control references are only logged.
    pub fn add_finding(&mut self, finding: Finding) {
        if self.config.warn_on_dangling_references {
            for control_id in finding
                .affected_controls
                .iter()
                .filter(|control_id| !self.catalog.contains(control_id))
            {
                log_warning!("Finding references a control outside the catalog",
                    "finding_id" => &finding.id,
                    "control_id" => control_id
                );
            }
        }

        self.findings.add(finding);
    }

    pub fn findings(&self) -> &[Finding] {
        self.findings.as_slice()
    }

    /// `(finding id, control id)` pairs naming controls absent from the catalog
    pub fn dangling_references(&self) -> Vec<(String, String)> {
        self.findings.dangling_references(&self.catalog)
    }

    pub fn domain_score(&self, domain: &str) -> f64 {
        scoring::domain_score(self.store.as_slice(), domain)
    }

    pub fn overall_score(&self) -> f64 {
        scoring::overall_score(self.store.as_slice())
    }

    /// One entry per catalog domain; unassessed domains score 0.0
    pub fn domain_scores(&self) -> BTreeMap<String, f64> {
        scoring::domain_scores(self.store.as_slice(), self.catalog.domains())
    }

    /// Build a fresh report from the current state, stamped now
    pub fn generate_report(&self) -> Report {
        self.generate_report_at(Utc::now())
    }

    /// Build a fresh report from the current state with an explicit timestamp
    pub fn generate_report_at(&self, timestamp: DateTime<Utc>) -> Report {
        let domains: Vec<String> = self.catalog.domains().map(str::to_string).collect();

        let report = ReportSynthesizer::synthesize(
            SynthesisInputs {
                scope: self.scope.as_ref(),
                assessments: self.store.as_slice(),
                findings: self.findings.as_slice(),
                domains: &domains,
                framework: &self.config.framework_name,
                generated_by: &self.config.tool_name,
            },
            timestamp,
        );

        log_success!(codes::success::REPORT_GENERATED, "Audit report synthesized",
            "assessments" => report.assessments.len(),
            "findings" => report.findings.len(),
            "overall_score" => format!("{:.1}", report.overall_score)
        );

        report
    }

    /// Generate a report and write `<stem>.json` and `<stem>.md` into `output_dir`
    pub fn export_report(&self, output_dir: &Path, stem: &str) -> Result<ExportedReport, AuditError> {
        let report = self.generate_report();
        Ok(results::export_report(&report, output_dir, stem)?)
    }
}
