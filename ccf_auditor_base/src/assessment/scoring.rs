//! Pure scoring functions over recorded assessments
//!
//! NotApplicable assessments are excluded from every denominator. An empty set
//! scores 0.0, so an unassessed domain is numerically indistinguishable from a
//! fully non-compliant one.

use crate::types::Assessment;
use std::collections::BTreeMap;

fn mean<'a>(assessments: impl Iterator<Item = &'a Assessment>) -> f64 {
    let (total, count) = assessments
        .filter(|assessment| assessment.counts_toward_score())
        .fold((0.0, 0usize), |(total, count), assessment| {
            (total + assessment.score, count + 1)
        });

    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Mean score of the assessments recorded under `domain`
pub fn domain_score(assessments: &[Assessment], domain: &str) -> f64 {
    mean(assessments.iter().filter(|a| a.domain == domain))
}

/// Micro-average over every scored assessment, regardless of domain.
///
/// This is not the mean of the domain scores: domain A = {100} and
/// domain B = {0, 0, 0} give 25 here but 50 as a mean of domain scores.
pub fn overall_score(assessments: &[Assessment]) -> f64 {
    mean(assessments.iter())
}

/// One entry per listed domain, plus any domain that only appears on an assessment
pub fn domain_scores<'a>(
    assessments: &[Assessment],
    domains: impl IntoIterator<Item = &'a str>,
) -> BTreeMap<String, f64> {
    let mut names: Vec<&str> = domains.into_iter().collect();
    names.extend(assessments.iter().map(|a| a.domain.as_str()));

    names
        .into_iter()
        .map(|domain| (domain.to_string(), domain_score(assessments, domain)))
        .collect()
}

/// Arithmetic mean of the per-domain scores (macro-average)
pub fn mean_of_domain_scores(scores: &BTreeMap<String, f64>) -> f64 {
    if scores.is_empty() {
        0.0
    } else {
        scores.values().sum::<f64>() / scores.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ComplianceStatus;
    use ccf_core::catalog::Control;

    fn assess(id: &str, domain: &str, status: ComplianceStatus) -> Assessment {
        let control = Control::new(id, domain, id, "");
        Assessment::for_control(&control, status, "", Vec::new(), "")
    }

    #[test]
    fn test_not_applicable_is_excluded() {
        let assessments = vec![
            assess("A-1", "A", ComplianceStatus::Compliant),
            assess("A-2", "A", ComplianceStatus::NotApplicable),
            assess("A-3", "A", ComplianceStatus::NotAssessed),
        ];

        assert_eq!(domain_score(&assessments, "A"), 50.0);
        assert_eq!(overall_score(&assessments), 50.0);
    }

    #[test]
    fn test_micro_versus_macro_average() {
        let assessments = vec![
            assess("A-1", "A", ComplianceStatus::Compliant),
            assess("B-1", "B", ComplianceStatus::NonCompliant),
            assess("B-2", "B", ComplianceStatus::NonCompliant),
            assess("B-3", "B", ComplianceStatus::NonCompliant),
        ];

        let scores = domain_scores(&assessments, ["A", "B"]);
        assert_eq!(overall_score(&assessments), 25.0);
        assert_eq!(mean_of_domain_scores(&scores), 50.0);
    }

    #[test]
    fn test_empty_domain_scores_zero() {
        let assessments = vec![assess("A-1", "A", ComplianceStatus::Compliant)];
        let scores = domain_scores(&assessments, ["A", "Unassessed"]);

        assert_eq!(scores["Unassessed"], 0.0);
        assert_eq!(domain_score(&assessments, "Nope"), 0.0);
        assert_eq!(overall_score(&[]), 0.0);
    }

    #[test]
    fn test_only_not_applicable_scores_zero() {
        let assessments = vec![assess("A-1", "A", ComplianceStatus::NotApplicable)];
        assert_eq!(domain_score(&assessments, "A"), 0.0);
        assert_eq!(overall_score(&assessments), 0.0);
    }
}
