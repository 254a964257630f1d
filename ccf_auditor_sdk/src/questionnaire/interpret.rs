//! Free-text and selected answer interpretation
//!
//! Options are ordered best to worst. A response resolves to an option index
//! by substring match, then by keyword fallback; the index position decides
//! status and score.

use ccf_auditor_base::types::ComplianceStatus;

/// Middle-option scores at or above this are Partial, below are NonCompliant
pub const PARTIAL_SCORE_FLOOR: f64 = 50.0;

const BEST_KEYWORDS: [&str; 3] = ["yes", "comprehensive", "all"];
const MIDDLE_KEYWORDS: [&str; 3] = ["partial", "basic", "some"];
const WORST_KEYWORDS: [&str; 3] = ["no", "never", "none"];

/// Outcome of interpreting one answer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpretation {
    pub status: ComplianceStatus,
    /// Always within 0..=100
    pub score: f64,
    /// Option the response resolved to, `None` when unresolved
    pub resolved_index: Option<usize>,
}

impl Interpretation {
    fn unresolved() -> Self {
        Self {
            status: ComplianceStatus::NotAssessed,
            score: 0.0,
            resolved_index: None,
        }
    }
}

/// Resolve a response to an option index.
///
/// Case-insensitive containment either way, first option wins. An empty
/// response never matches.
pub fn resolve_option<S: AsRef<str>>(response: &str, options: &[S]) -> Option<usize> {
    let response = response.trim().to_lowercase();
    if response.is_empty() || options.is_empty() {
        return None;
    }

    let direct = options.iter().position(|option| {
        let option = option.as_ref().to_lowercase();
        option.contains(&response) || response.contains(&option)
    });
    if direct.is_some() {
        return direct;
    }

    let mentions = |keywords: &[&str]| keywords.iter().any(|keyword| response.contains(keyword));
    let last = options.len() - 1;

    if mentions(&BEST_KEYWORDS) {
        Some(0)
    } else if mentions(&MIDDLE_KEYWORDS) {
        Some(last.min(1))
    } else if mentions(&WORST_KEYWORDS) {
        Some(last)
    } else {
        None
    }
}

/// Classify a resolved option position
pub fn classify_index(index: usize, option_count: usize) -> Interpretation {
    if option_count == 0 || index >= option_count {
        return Interpretation::unresolved();
    }

    let last = option_count - 1;
    let (status, score) = if index == 0 {
        (ComplianceStatus::Compliant, 100.0)
    } else if index == last {
        (ComplianceStatus::NonCompliant, 0.0)
    } else {
        let score = 100.0 - (index as f64 / last as f64) * 100.0;
        if score >= PARTIAL_SCORE_FLOOR {
            (ComplianceStatus::Partial, score)
        } else {
            (ComplianceStatus::NonCompliant, score)
        }
    };

    Interpretation {
        status,
        score,
        resolved_index: Some(index),
    }
}

/// Convert an answer into status and score.
///
/// Unresolved answers yield `NotAssessed` with score 0.
pub fn interpret_response<S: AsRef<str>>(response: &str, options: &[S]) -> Interpretation {
    match resolve_option(response, options) {
        Some(index) => classify_index(index, options.len()),
        None => Interpretation::unresolved(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XYZ: [&str; 3] = ["Yes, for all users", "Privileged users only", "No MFA"];

    #[test]
    fn test_middle_option_is_partial_fifty() {
        let result = interpret_response("privileged users only", &XYZ);
        assert_eq!(result.status, ComplianceStatus::Partial);
        assert_eq!(result.score, 50.0);
        assert_eq!(result.resolved_index, Some(1));
    }

    #[test]
    fn test_first_and_last_positions() {
        let first = interpret_response("Yes, for all users", &XYZ);
        assert_eq!(first.status, ComplianceStatus::Compliant);
        assert_eq!(first.score, 100.0);

        let last = interpret_response("no mfa", &XYZ);
        assert_eq!(last.status, ComplianceStatus::NonCompliant);
        assert_eq!(last.score, 0.0);
    }

    #[test]
    fn test_response_containing_option() {
        let options = ["Monthly", "Quarterly", "Never"];
        let result = interpret_response("We reconcile quarterly, mostly", &options);
        assert_eq!(result.resolved_index, Some(1));
    }

    #[test]
    fn test_keyword_fallback() {
        let options = ["Automated RBAC", "Manual approval", "Ad-hoc process", "Nothing formal"];

        assert_eq!(resolve_option("yes we do", &options), Some(0));
        assert_eq!(resolve_option("a partial rollout", &options), Some(1));
        assert_eq!(resolve_option("never did", &options), Some(3));
    }

    #[test]
    fn test_keyword_fallback_with_two_options() {
        let options = ["Enforced", "Absent"];
        assert_eq!(resolve_option("basic", &options), Some(1));
    }

    #[test]
    fn test_lower_middle_option_is_non_compliant() {
        // 5 options: index 3 scores 25
        let options = ["A1", "B2", "C3", "D4", "E5"];
        let result = interpret_response("d4", &options);
        assert_eq!(result.status, ComplianceStatus::NonCompliant);
        assert_eq!(result.score, 25.0);

        let upper = interpret_response("b2", &options);
        assert_eq!(upper.status, ComplianceStatus::Partial);
        assert_eq!(upper.score, 75.0);
    }

    #[test]
    fn test_unresolved_is_not_assessed() {
        let result = interpret_response("maybe later", &XYZ);
        assert_eq!(result.status, ComplianceStatus::NotAssessed);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.resolved_index, None);
    }

    #[test]
    fn test_empty_response_never_matches() {
        assert_eq!(resolve_option("   ", &XYZ), None);
        assert_eq!(interpret_response("", &XYZ).status, ComplianceStatus::NotAssessed);
    }

    #[test]
    fn test_no_options() {
        let options: [&str; 0] = [];
        assert_eq!(interpret_response("yes", &options).resolved_index, None);
    }

    #[test]
    fn test_scores_stay_in_range() {
        for count in 1..8 {
            for index in 0..count {
                let result = classify_index(index, count);
                assert!((0.0..=100.0).contains(&result.score));
            }
        }
    }
}
