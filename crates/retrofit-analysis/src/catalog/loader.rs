//! Catalog loading from the embedded JSON table or a user-supplied file.

use std::collections::BTreeMap;
use std::path::Path;

use retrofit_core::errors::CatalogError;

use super::types::{Category, DeprecatedApiRule, RuleCatalog};

/// The catalog compiled into the binary.
const DEFAULT_CATALOG: &str = include_str!("deprecated-apis.json");

/// Top-level framework section of the catalog file.
const FRAMEWORK_SECTION: &str = "react";

impl RuleCatalog {
    /// Load the embedded React catalog.
    pub fn load_default() -> Result<Self, CatalogError> {
        Self::from_json(DEFAULT_CATALOG)
    }

    /// Load a catalog from a JSON file on disk.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Parse `{ "react": { "<category key>": [rule, ...], ... } }`.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let root: serde_json::Value =
            serde_json::from_str(json).map_err(|e| CatalogError::Malformed(e.to_string()))?;

        let section = root
            .get(FRAMEWORK_SECTION)
            .cloned()
            .ok_or_else(|| CatalogError::MissingSection(FRAMEWORK_SECTION.to_string()))?;

        let raw: BTreeMap<String, Vec<DeprecatedApiRule>> = serde_json::from_value(section)
            .map_err(|e| CatalogError::Malformed(e.to_string()))?;

        let mut sections = Vec::with_capacity(raw.len());
        for (key, rules) in raw {
            let category = Category::from_catalog_key(&key)
                .ok_or_else(|| CatalogError::UnknownCategory(key.clone()))?;
            sections.push((category, rules));
        }

        let catalog = RuleCatalog::from_sections(sections);
        tracing::debug!(rules = catalog.len(), "rule catalog loaded");
        Ok(catalog)
    }
}
