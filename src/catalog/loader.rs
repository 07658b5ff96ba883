//! TOML catalog loading.
//!
//! Provides two loading methods:
//! - `default_catalog()` - The catalog embedded in the binary, parsed once
//! - `load_catalog(path)` - A custom catalog file with the same schema

use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use super::types::Material;
use super::validation::validate_materials;
use crate::error::SelectorError;

/// Default catalog embedded in the binary at compile time.
const DEFAULT_CATALOG: &str = include_str!("../../config/material_catalog.toml");

static DEFAULT: OnceLock<MaterialCatalog> = OnceLock::new();

/// Catalog file layout: materials grouped by category.
/// The grouping exists for authoring only and never leaves this module.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    metals: Vec<Material>,
    #[serde(default)]
    polymers: Vec<Material>,
    #[serde(default)]
    composites: Vec<Material>,
}

/// Immutable, flattened material catalog.
///
/// Order is metals, then polymers, then composites, each in declaration
/// order. Ranking relies on this order to break score ties.
#[derive(Debug, Clone)]
pub struct MaterialCatalog {
    materials: Vec<Material>,
}

impl MaterialCatalog {
    /// Parse and validate catalog TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, SelectorError> {
        let file: CatalogFile = toml::from_str(content)?;
        let (metals, polymers, composites) =
            (file.metals.len(), file.polymers.len(), file.composites.len());

        let materials: Vec<Material> = file
            .metals
            .into_iter()
            .chain(file.polymers)
            .chain(file.composites)
            .collect();

        let catalog = Self::from_materials(materials)?;
        info!(
            "Loaded catalog with {} materials ({} metals, {} polymers, {} composites)",
            catalog.len(),
            metals,
            polymers,
            composites
        );
        Ok(catalog)
    }

    /// Build a catalog from an already-flattened list, validating it.
    /// Every validation issue is reported, not just the first.
    pub fn from_materials(materials: Vec<Material>) -> Result<Self, SelectorError> {
        let issues = validate_materials(&materials);
        if !issues.is_empty() {
            let summary = issues
                .iter()
                .map(|i| format!("{} ({}): {}", i.material, i.field, i.message))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SelectorError::Catalog(summary));
        }
        Ok(Self { materials })
    }

    /// The full candidate list in catalog order. Stable across calls.
    pub fn all_materials(&self) -> &[Material] {
        &self.materials
    }

    /// Look up a material by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&Material> {
        self.materials
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

/// Load a catalog from a TOML file at the given path.
///
/// # Returns
/// * `Ok(MaterialCatalog)` - Parsed and validated catalog
/// * `Err` - If the file cannot be read, the TOML is invalid, or validation fails
pub fn load_catalog(path: &Path) -> Result<MaterialCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
    let catalog = MaterialCatalog::from_toml_str(&content)
        .with_context(|| format!("Invalid catalog file {}", path.display()))?;
    Ok(catalog)
}

/// Get the process-wide default catalog embedded in the binary.
/// Parsed on first use; later calls return the same instance.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_catalog() -> &'static MaterialCatalog {
    DEFAULT.get_or_init(|| {
        MaterialCatalog::from_toml_str(DEFAULT_CATALOG)
            .expect("embedded material_catalog.toml must be valid")
    })
}

/// Flattened, ordered view of the default catalog.
pub fn all_materials() -> &'static [Material] {
    default_catalog().all_materials()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(materials: &[Material]) -> Vec<&str> {
        materials.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_default_catalog_loads() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 11, "Should have exactly 11 materials");
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_default_catalog_preserves_group_order() {
        let all = all_materials();
        assert_eq!(
            names(all),
            vec![
                "Aluminum 6061",
                "Stainless Steel 316",
                "Titanium Ti-6Al-4V",
                "Carbon Steel A36",
                "PLA (Bioplastic)",
                "PEEK",
                "Recycled PET",
                "Nylon 6/6",
                "Carbon Fiber Composite",
                "Flax Fiber Composite",
                "Glass Fiber Composite",
            ]
        );
    }

    #[test]
    fn test_all_materials_is_stable_across_calls() {
        let first = all_materials();
        let second = all_materials();
        assert_eq!(first, second);
        assert!(std::ptr::eq(default_catalog(), default_catalog()));
    }

    #[test]
    fn test_groups_flatten_in_category_order_regardless_of_file_order() {
        let toml_src = r#"
            [[composites]]
            name = "C1"
            strength = "High"
            temperature_rating = "Up to 100°C"
            corrosion_resistance = "Good"
            recyclable = false
            sustainability_score = 10
            cost = "Low"
            weight = "Light"
            application_tags = []

            [[metals]]
            name = "M1"
            strength = "Low"
            temperature_rating = "Up to 100°C"
            corrosion_resistance = "Poor"
            recyclable = true
            sustainability_score = 20
            cost = "Low"
            weight = "Heavy"
            application_tags = ["structural"]
        "#;
        let catalog = MaterialCatalog::from_toml_str(toml_src).unwrap();
        assert_eq!(names(catalog.all_materials()), vec!["M1", "C1"]);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let entry = r#"
            [[metals]]
            name = "Dup"
            strength = "Low"
            temperature_rating = "n/a"
            corrosion_resistance = "Poor"
            recyclable = true
            sustainability_score = 20
            cost = "Low"
            weight = "Heavy"
            application_tags = []
        "#;
        let toml_src = format!("{entry}\n{entry}");
        let err = MaterialCatalog::from_toml_str(&toml_src).unwrap_err();
        assert!(matches!(err, SelectorError::Catalog(_)));
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_unknown_strength_label_is_a_parse_error() {
        let toml_src = r#"
            [[metals]]
            name = "Odd"
            strength = "Extreme"
            temperature_rating = "n/a"
            corrosion_resistance = "Poor"
            recyclable = true
            sustainability_score = 20
            cost = "Low"
            weight = "Heavy"
            application_tags = []
        "#;
        let err = MaterialCatalog::from_toml_str(toml_src).unwrap_err();
        assert!(matches!(err, SelectorError::Toml(_)));
    }

    #[test]
    fn test_from_materials_reports_every_issue() {
        let mut unnamed = all_materials()[0].clone();
        unnamed.name = String::new();
        let mut overrated = all_materials()[1].clone();
        overrated.sustainability_score = 150;

        let err = MaterialCatalog::from_materials(vec![unnamed, overrated]).unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, SelectorError::Catalog(_)));
        assert!(message.contains("name"), "{}", message);
        assert!(message.contains("sustainability_score"), "{}", message);
        assert_eq!(message.matches("; ").count(), 1);
    }

    #[test]
    fn test_from_materials_keeps_order() {
        let picked = vec![all_materials()[5].clone(), all_materials()[0].clone()];
        let catalog = MaterialCatalog::from_materials(picked).unwrap();
        assert_eq!(names(catalog.all_materials()), vec!["PEEK", "Aluminum 6061"]);
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let catalog = default_catalog();
        let peek = catalog.find("peek").unwrap();
        assert_eq!(peek.name, "PEEK");
        assert!(catalog.find("Unobtanium").is_none());
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let result = load_catalog(Path::new("/nonexistent/catalog.toml"));
        assert!(result.is_err());
    }
}
