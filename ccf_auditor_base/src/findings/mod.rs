//! Append-only finding registry

use crate::types::{Finding, Priority};
use ccf_core::catalog::Catalog;

/// Ordered list of findings, independent of the assessment store.
///
/// Control cross-references are advisory: `add` never rejects a finding, and
/// references to controls outside the catalog can be listed afterwards with
/// [`FindingRegistry::dangling_references`].
#[derive(Debug, Clone, Default)]
pub struct FindingRegistry {
    findings: Vec<Finding>,
}

impl FindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn as_slice(&self) -> &[Finding] {
        &self.findings
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Findings of one priority, in insertion order
    pub fn with_priority(&self, priority: Priority) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(move |finding| finding.priority == priority)
    }

    /// `(finding id, control id)` pairs naming controls absent from the catalog
    pub fn dangling_references(&self, catalog: &Catalog) -> Vec<(String, String)> {
        self.findings
            .iter()
            .flat_map(|finding| {
                finding
                    .affected_controls
                    .iter()
                    .filter(|control_id| !catalog.contains(control_id))
                    .map(|control_id| (finding.id.clone(), control_id.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccf_core::catalog::Control;

    #[test]
    fn test_append_keeps_duplicates_and_order() {
        let mut registry = FindingRegistry::new();
        registry.add(Finding::new("F-1", "first", "", Priority::High));
        registry.add(Finding::new("F-1", "second", "", Priority::Critical));
        registry.add(Finding::new("F-2", "third", "", Priority::High));

        assert_eq!(registry.len(), 3);
        let high: Vec<&str> = registry
            .with_priority(Priority::High)
            .map(|f| f.title.as_str())
            .collect();
        assert_eq!(high, vec!["first", "third"]);
    }

    #[test]
    fn test_dangling_references() {
        let catalog = Catalog::builder()
            .control(Control::new("IAM-02", "IAM", "MFA", ""))
            .build()
            .unwrap();

        let mut registry = FindingRegistry::new();
        registry.add(
            Finding::new("F-1", "t", "", Priority::Critical)
                .with_affected_control("IAM-02")
                .with_affected_control("ZZ-99"),
        );

        assert_eq!(
            registry.dangling_references(&catalog),
            vec![("F-1".to_string(), "ZZ-99".to_string())]
        );
    }
}
