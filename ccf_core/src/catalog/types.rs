//! Control catalog data model

use super::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// A single security control. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    #[serde(rename = "ccf_id")]
    pub id: String,
    pub domain: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub control_type: Option<String>,
    #[serde(default)]
    pub policy_standard: Option<String>,
    #[serde(default)]
    pub implementation_guidance: Option<String>,
    #[serde(default)]
    pub testing_procedure: Option<String>,
    #[serde(default)]
    pub audit_artifacts: Option<String>,
    /// Framework name -> whether this control applies to it
    #[serde(default)]
    pub applicable_frameworks: Option<BTreeMap<String, bool>>,
}

impl Control {
    pub fn new(id: &str, domain: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            domain: domain.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            theme: None,
            control_type: None,
            policy_standard: None,
            implementation_guidance: None,
            testing_procedure: None,
            audit_artifacts: None,
            applicable_frameworks: None,
        }
    }

    pub fn with_implementation_guidance(mut self, guidance: &str) -> Self {
        self.implementation_guidance = Some(guidance.to_string());
        self
    }

    pub fn with_framework(mut self, framework: &str, applicable: bool) -> Self {
        self.applicable_frameworks
            .get_or_insert_with(BTreeMap::new)
            .insert(framework.to_string(), applicable);
        self
    }

    /// Whether the control is marked applicable to the named framework
    pub fn applies_to(&self, framework: &str) -> bool {
        self.applicable_frameworks
            .as_ref()
            .and_then(|frameworks| frameworks.get(framework))
            .copied()
            .unwrap_or(false)
    }
}

/// An evidence request item from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub reference: String,
    pub domain: String,
    pub title: String,
}

/// Raw catalog document as exported to JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogDocument {
    pub controls: Vec<Control>,
    pub evidence: Vec<EvidenceItem>,
    pub domains: BTreeMap<String, Vec<String>>,
}

/// Validated, read-only control catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    controls: Vec<Control>,
    evidence: Vec<EvidenceItem>,
    domains: BTreeMap<String, Vec<String>>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Validate a raw document into a catalog.
    ///
    /// Control identifiers must be unique and every domain index entry must name
    /// a known control. Controls the index does not mention are appended under
    /// their own domain, so the index always covers every control.
    pub fn from_document(document: CatalogDocument) -> CatalogResult<Self> {
        let CatalogDocument {
            controls,
            evidence,
            mut domains,
        } = document;

        let mut index = HashMap::with_capacity(controls.len());
        for (position, control) in controls.iter().enumerate() {
            if index.insert(control.id.clone(), position).is_some() {
                return Err(CatalogError::duplicate_control(&control.id));
            }
        }

        let mut indexed = HashSet::new();
        for (domain, ids) in &domains {
            for id in ids {
                if !index.contains_key(id) {
                    return Err(CatalogError::unknown_domain_member(domain, id));
                }
                indexed.insert(id.clone());
            }
        }

        for control in &controls {
            if !indexed.contains(&control.id) {
                domains
                    .entry(control.domain.clone())
                    .or_default()
                    .push(control.id.clone());
            }
        }

        Ok(Self {
            controls,
            evidence,
            domains,
            index,
        })
    }

    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn control(&self, control_id: &str) -> Option<&Control> {
        self.index
            .get(control_id)
            .map(|&position| &self.controls[position])
    }

    pub fn contains(&self, control_id: &str) -> bool {
        self.index.contains_key(control_id)
    }

    /// All controls in catalog order
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn evidence(&self) -> &[EvidenceItem] {
        &self.evidence
    }

    /// Domain names, sorted
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }

    /// Controls listed for a domain, in index order
    pub fn controls_in_domain(&self, domain: &str) -> Vec<&Control> {
        self.domains
            .get(domain)
            .map(|ids| ids.iter().filter_map(|id| self.control(id)).collect())
            .unwrap_or_default()
    }

    pub fn evidence_for_domain(&self, domain: &str) -> Vec<&EvidenceItem> {
        self.evidence
            .iter()
            .filter(|item| item.domain == domain)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn statistics(&self) -> CatalogStatistics {
        CatalogStatistics {
            total_controls: self.controls.len(),
            total_domains: self.domains.len(),
            total_evidence_items: self.evidence.len(),
            controls_by_domain: self
                .domains
                .iter()
                .map(|(domain, ids)| (domain.clone(), ids.len()))
                .collect(),
        }
    }

    /// Convert back into the exportable document form
    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            controls: self.controls.clone(),
            evidence: self.evidence.clone(),
            domains: self.domains.clone(),
        }
    }
}

/// Summary counts for a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStatistics {
    pub total_controls: usize,
    pub total_domains: usize,
    pub total_evidence_items: usize,
    pub controls_by_domain: BTreeMap<String, usize>,
}

impl CatalogStatistics {
    pub fn summary(&self) -> String {
        let mut output = format!(
            "Controls: {}\nDomains: {}\nEvidence items: {}\n",
            self.total_controls, self.total_domains, self.total_evidence_items
        );
        for (domain, count) in &self.controls_by_domain {
            output.push_str(&format!("  {}: {}\n", domain, count));
        }
        output
    }
}

/// Programmatic catalog construction
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    document: CatalogDocument,
}

impl CatalogBuilder {
    pub fn control(mut self, control: Control) -> Self {
        self.document.controls.push(control);
        self
    }

    pub fn evidence(mut self, reference: &str, domain: &str, title: &str) -> Self {
        self.document.evidence.push(EvidenceItem {
            reference: reference.to_string(),
            domain: domain.to_string(),
            title: title.to_string(),
        });
        self
    }

    /// Declare a domain up front, even if it ends up with no controls
    pub fn domain(mut self, domain: &str) -> Self {
        self.document.domains.entry(domain.to_string()).or_default();
        self
    }

    pub fn build(self) -> CatalogResult<Catalog> {
        Catalog::from_document(self.document)
    }
}
