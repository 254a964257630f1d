//! Keyed record of the latest assessment per control

use crate::types::{Assessment, ComplianceStatus};
use std::collections::HashMap;

/// Latest assessment per control identifier.
///
/// Iteration follows first-insertion order. Re-assessing a control replaces the
/// earlier record in place, keeping its position.
#[derive(Debug, Clone, Default)]
pub struct AssessmentStore {
    assessments: Vec<Assessment>,
    positions: HashMap<String, usize>,
}

impl AssessmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace, returning the stored record and whether it replaced one
    pub fn upsert(&mut self, assessment: Assessment) -> (&Assessment, bool) {
        match self.positions.get(&assessment.control_id) {
            Some(&position) => {
                self.assessments[position] = assessment;
                (&self.assessments[position], true)
            }
            None => {
                let position = self.assessments.len();
                self.positions
                    .insert(assessment.control_id.clone(), position);
                self.assessments.push(assessment);
                (&self.assessments[position], false)
            }
        }
    }

    pub fn get(&self, control_id: &str) -> Option<&Assessment> {
        self.positions
            .get(control_id)
            .map(|&position| &self.assessments[position])
    }

    pub fn as_slice(&self) -> &[Assessment] {
        &self.assessments
    }

    pub fn iter(&self) -> impl Iterator<Item = &Assessment> {
        self.assessments.iter()
    }

    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }

    pub fn count_with_status(&self, status: ComplianceStatus) -> usize {
        self.assessments
            .iter()
            .filter(|assessment| assessment.status == status)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccf_core::catalog::Control;

    fn assess(id: &str, status: ComplianceStatus) -> Assessment {
        let control = Control::new(id, "Identity and Access Management", id, "");
        Assessment::for_control(&control, status, "", Vec::new(), "")
    }

    #[test]
    fn test_reassessment_replaces_in_place() {
        let mut store = AssessmentStore::new();
        store.upsert(assess("IAM-01", ComplianceStatus::Compliant));
        store.upsert(assess("IAM-02", ComplianceStatus::NonCompliant));

        let (stored, replaced) = store.upsert(assess("IAM-01", ComplianceStatus::Partial));
        assert!(replaced);
        assert_eq!(stored.score, 50.0);

        assert_eq!(store.len(), 2);
        assert_eq!(store.as_slice()[0].control_id, "IAM-01");
        assert_eq!(store.as_slice()[0].status, ComplianceStatus::Partial);
        assert_eq!(store.count_with_status(ComplianceStatus::Compliant), 0);
        assert_eq!(store.get("IAM-02").unwrap().status, ComplianceStatus::NonCompliant);
    }
}
