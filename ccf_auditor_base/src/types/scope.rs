use serde::{Deserialize, Serialize};

/// Descriptive context of the system under audit.
///
/// Values are free text; nothing is validated against a fixed vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeDescriptor {
    pub system_name: String,
    pub primary_function: String,
    /// Data classification tags (PII, confidential, payment data, ...)
    pub data_types: Vec<String>,
    /// cloud-native, on-prem, hybrid, ...
    pub architecture: String,
    /// AWS, Azure, GCP, on-prem, ...
    pub deployment_environment: String,
    /// ISO 27001, SOC 2, PCI-DSS, ...
    pub compliance_requirements: Vec<String>,
    /// internal, external, both
    pub user_base: String,
    pub criticality: String,
    #[serde(default)]
    pub additional_context: String,
}

impl ScopeDescriptor {
    pub fn new(system_name: impl Into<String>) -> Self {
        Self {
            system_name: system_name.into(),
            ..Self::default()
        }
    }

    pub fn with_primary_function(mut self, function: impl Into<String>) -> Self {
        self.primary_function = function.into();
        self
    }

    pub fn with_data_types<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data_types = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_architecture(mut self, architecture: impl Into<String>) -> Self {
        self.architecture = architecture.into();
        self
    }

    pub fn with_deployment_environment(mut self, environment: impl Into<String>) -> Self {
        self.deployment_environment = environment.into();
        self
    }

    pub fn with_compliance_requirements<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compliance_requirements = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_user_base(mut self, user_base: impl Into<String>) -> Self {
        self.user_base = user_base.into();
        self
    }

    pub fn with_criticality(mut self, criticality: impl Into<String>) -> Self {
        self.criticality = criticality.into();
        self
    }

    pub fn with_additional_context(mut self, context: impl Into<String>) -> Self {
        self.additional_context = context.into();
        self
    }
}
