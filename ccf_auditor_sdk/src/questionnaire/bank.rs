//! Question bank loading and lookup

use ccf_auditor_base::types::ScopeDescriptor;
use ccf_core::catalog::Catalog;
use ccf_core::logging::codes::{self, Code};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const EMBEDDED_BANK: &str = include_str!("questions.toml");

#[derive(Debug, thiserror::Error)]
pub enum QuestionBankError {
    #[error("Failed to read question bank '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid question bank TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Domain '{domain}' is defined more than once")]
    DuplicateDomain { domain: String },

    #[error("Question for {control_id} needs at least two options: '{text}'")]
    TooFewOptions { control_id: String, text: String },

    #[error("Question has no control identifier: '{text}'")]
    MissingControlId { text: String },
}

impl QuestionBankError {
    pub fn error_code(&self) -> Code {
        codes::questionnaire::QUESTION_BANK_INVALID
    }
}

/// Scope field a scoping answer is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeField {
    SystemName,
    PrimaryFunction,
    DataTypes,
    Architecture,
    DeploymentEnvironment,
    ComplianceRequirements,
    UserBase,
    Criticality,
    AdditionalContext,
}

impl ScopeField {
    /// List fields take comma-separated answers
    pub fn is_list(&self) -> bool {
        matches!(self, Self::DataTypes | Self::ComplianceRequirements)
    }

    /// Write an answer into the descriptor
    pub fn apply(&self, scope: &mut ScopeDescriptor, answer: &str) {
        let answer = answer.trim();
        match self {
            Self::SystemName => scope.system_name = answer.to_string(),
            Self::PrimaryFunction => scope.primary_function = answer.to_string(),
            Self::DataTypes => scope.data_types = split_list(answer),
            Self::Architecture => scope.architecture = answer.to_string(),
            Self::DeploymentEnvironment => scope.deployment_environment = answer.to_string(),
            Self::ComplianceRequirements => scope.compliance_requirements = split_list(answer),
            Self::UserBase => scope.user_base = answer.to_string(),
            Self::Criticality => scope.criticality = answer.to_string(),
            Self::AdditionalContext => scope.additional_context = answer.to_string(),
        }
    }
}

fn split_list(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopingQuestion {
    pub field: ScopeField,
    pub text: String,
    /// Suggested answers; empty means free text only
    #[serde(default)]
    pub options: Vec<String>,
}

/// A control question with options ordered best to worst
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub control_id: String,
    pub text: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainQuestions {
    pub name: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    #[serde(default)]
    scoping: Vec<ScopingQuestion>,
    #[serde(default, rename = "domain")]
    domains: Vec<DomainQuestions>,
}

impl QuestionBank {
    /// The question bank compiled into the binary
    pub fn embedded() -> Result<Self, QuestionBankError> {
        Self::from_toml_str(EMBEDDED_BANK)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, QuestionBankError> {
        let bank: Self = toml::from_str(content)?;
        bank.validate()?;
        Ok(bank)
    }

    pub fn from_path(path: &Path) -> Result<Self, QuestionBankError> {
        let content = std::fs::read_to_string(path).map_err(|source| QuestionBankError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), QuestionBankError> {
        let mut seen = HashSet::new();
        for domain in &self.domains {
            if !seen.insert(domain.name.as_str()) {
                return Err(QuestionBankError::DuplicateDomain {
                    domain: domain.name.clone(),
                });
            }

            for question in &domain.questions {
                if question.control_id.trim().is_empty() {
                    return Err(QuestionBankError::MissingControlId {
                        text: question.text.clone(),
                    });
                }
                if question.options.len() < 2 {
                    return Err(QuestionBankError::TooFewOptions {
                        control_id: question.control_id.clone(),
                        text: question.text.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn scoping_questions(&self) -> &[ScopingQuestion] {
        &self.scoping
    }

    /// Questions for a domain; empty when the domain has none
    pub fn questions_for_domain(&self, domain: &str) -> &[Question] {
        self.domains
            .iter()
            .find(|entry| entry.name == domain)
            .map(|entry| entry.questions.as_slice())
            .unwrap_or(&[])
    }

    /// Domain names in bank order
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(|entry| entry.name.as_str())
    }

    pub fn question_count(&self) -> usize {
        self.domains.iter().map(|entry| entry.questions.len()).sum()
    }

    /// Questions whose control the catalog does not contain
    pub fn unknown_controls<'a>(&'a self, catalog: &Catalog) -> Vec<&'a Question> {
        self.domains
            .iter()
            .flat_map(|entry| entry.questions.iter())
            .filter(|question| !catalog.contains(&question.control_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use ccf_core::catalog::Control;

    #[test]
    fn test_embedded_bank_loads() {
        let bank = QuestionBank::embedded().unwrap();

        assert_eq!(bank.domains().count(), 16);
        assert_eq!(bank.question_count(), 65);
        assert_eq!(bank.scoping_questions()[0].field, ScopeField::SystemName);

        let iam = bank.questions_for_domain("Identity and Access Management");
        assert_eq!(iam.len(), 5);
        assert_eq!(iam[0].control_id, "IAM-05");
        assert_eq!(iam[0].options.len(), 3);
    }

    #[test]
    fn test_unknown_domain_has_no_questions() {
        let bank = QuestionBank::embedded().unwrap();
        assert!(bank.questions_for_domain("Physical Security").is_empty());
    }

    #[test]
    fn test_rejects_single_option_question() {
        let content = r#"
            [[domain]]
            name = "Cryptography"

            [[domain.questions]]
            control_id = "CR-01"
            text = "Are standards defined?"
            options = ["Yes"]
        "#;
        assert_matches!(
            QuestionBank::from_toml_str(content),
            Err(QuestionBankError::TooFewOptions { .. })
        );
    }

    #[test]
    fn test_rejects_duplicate_domain() {
        let content = r#"
            [[domain]]
            name = "Cryptography"

            [[domain]]
            name = "Cryptography"
        "#;
        assert_matches!(
            QuestionBank::from_toml_str(content),
            Err(QuestionBankError::DuplicateDomain { ref domain }) if domain == "Cryptography"
        );
    }

    #[test]
    fn test_malformed_toml() {
        let err = QuestionBank::from_toml_str("[[domain]\nname =").unwrap_err();
        assert_matches!(err, QuestionBankError::Parse(_));
        assert_eq!(err.error_code(), codes::questionnaire::QUESTION_BANK_INVALID);
    }

    #[test]
    fn test_unknown_controls_against_catalog() {
        let bank = QuestionBank::from_toml_str(
            r#"
            [[domain]]
            name = "Cryptography"

            [[domain.questions]]
            control_id = "CR-01"
            text = "Are standards defined?"
            options = ["Yes", "No"]

            [[domain.questions]]
            control_id = "CR-99"
            text = "Unknown control?"
            options = ["Yes", "No"]
            "#,
        )
        .unwrap();
        let catalog = Catalog::builder()
            .control(Control::new("CR-01", "Cryptography", "Standards", ""))
            .build()
            .unwrap();

        let unknown = bank.unknown_controls(&catalog);
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].control_id, "CR-99");
    }

    #[test]
    fn test_scope_field_apply() {
        let mut scope = ScopeDescriptor::default();
        ScopeField::SystemName.apply(&mut scope, "  Payments API ");
        ScopeField::DataTypes.apply(&mut scope, "PII, Payment data,, ");
        ScopeField::Criticality.apply(&mut scope, "High");

        assert_eq!(scope.system_name, "Payments API");
        assert_eq!(scope.data_types, vec!["PII", "Payment data"]);
        assert_eq!(scope.criticality, "High");
        assert!(ScopeField::ComplianceRequirements.is_list());
        assert!(!ScopeField::UserBase.is_list());
    }
}
