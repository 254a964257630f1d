//! JSON catalog loading with compile-time size limits

use super::error::{CatalogError, CatalogResult};
use super::types::{Catalog, CatalogDocument};
use crate::config::compile_time::catalog::{MAX_CATALOG_FILE_SIZE, MAX_CONTROLS};
use crate::logging::codes;
use std::path::Path;

impl Catalog {
    /// Parse a catalog from its JSON export
    pub fn from_json_str(content: &str) -> CatalogResult<Self> {
        let document: CatalogDocument = serde_json::from_str(content)?;

        if document.controls.len() > MAX_CONTROLS {
            return Err(CatalogError::TooManyControls {
                count: document.controls.len(),
                max: MAX_CONTROLS,
            });
        }

        Catalog::from_document(document)
    }

    /// Load a catalog JSON file from disk
    pub fn from_path(path: &Path) -> CatalogResult<Self> {
        let result = load_from_path(path);

        match &result {
            Ok(catalog) => {
                crate::log_success!(
                    codes::success::CATALOG_LOADED,
                    "Control catalog loaded",
                    "path" => path.display(),
                    "controls" => catalog.len(),
                    "domains" => catalog.statistics().total_domains
                );
            }
            Err(err) => {
                crate::log_error!(err.error_code(), &err.to_string(),
                    "path" => path.display()
                );
            }
        }

        result
    }

    /// Serialize to the JSON export form
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_document())
    }
}

fn load_from_path(path: &Path) -> CatalogResult<Catalog> {
    let metadata = std::fs::metadata(path).map_err(|e| CatalogError::io(path, e))?;

    if metadata.len() > MAX_CATALOG_FILE_SIZE {
        return Err(CatalogError::FileTooLarge {
            size: metadata.len(),
            max: MAX_CATALOG_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    Catalog::from_json_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "controls": [
            {
                "ccf_id": "AM-01",
                "domain": "Asset Management",
                "name": "Inventory Management",
                "description": "Maintain an inventory of system components.",
                "theme": null,
                "implementation_guidance": "Keep an up to date inventory. Review quarterly.",
                "applicable_frameworks": {"SOC 2": true, "PCI": false}
            },
            {
                "ccf_id": "IAM-05",
                "domain": "Identity and Access Management",
                "name": "Authentication",
                "description": "Strong authentication.",
                "applicable_frameworks": null
            }
        ],
        "evidence": [
            {"reference": "AM-E1", "domain": "Asset Management", "title": "Asset inventory"}
        ],
        "domains": {
            "Asset Management": ["AM-01"]
        }
    }"#;

    #[test]
    fn test_parse_catalog_json() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();

        assert_eq!(catalog.len(), 2);
        let am = catalog.control("AM-01").unwrap();
        assert!(am.theme.is_none());
        assert!(am.applies_to("SOC 2"));
        assert!(catalog.control("IAM-05").unwrap().applicable_frameworks.is_none());

        // IAM-05 was missing from the index and gets its own domain entry
        assert_eq!(
            catalog
                .controls_in_domain("Identity and Access Management")
                .len(),
            1
        );
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let catalog = Catalog::from_json_str("{}").unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.domains().count(), 0);
    }

    #[test]
    fn test_invalid_json() {
        assert_matches!(
            Catalog::from_json_str("{\"controls\": [ {\"ccf_id\": 1} ]}"),
            Err(CatalogError::Parse(_))
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let catalog = Catalog::from_path(file.path()).unwrap();
        assert!(catalog.contains("AM-01"));

        let reparsed = Catalog::from_json_str(&catalog.to_json().unwrap()).unwrap();
        assert_eq!(reparsed.controls(), catalog.controls());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::from_path(&dir.path().join("absent.json")).unwrap_err();

        assert!(err.is_recoverable());
        assert_matches!(err, CatalogError::Io { .. });
    }
}
