use std::collections::HashSet;

use serde::Serialize;

use super::types::Material;

/// Upper bound of the sustainability rating scale.
pub const MAX_SUSTAINABILITY_SCORE: u8 = 100;

/// A problem found in catalog data.
/// Any issue makes the catalog unusable: names are identifiers and
/// sustainability ratings feed a threshold criterion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogIssue {
    /// Material the issue was found on (may be empty for nameless entries)
    pub material: String,
    /// The field name that triggered the issue
    pub field: String,
    /// Human-readable description
    pub message: String,
}

/// Check catalog records for duplicate or empty names and out-of-range
/// sustainability ratings. Returns every issue found, in catalog order.
pub fn validate_materials(materials: &[Material]) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for material in materials {
        let name = material.name.trim();

        if name.is_empty() {
            issues.push(CatalogIssue {
                material: material.name.clone(),
                field: "name".to_string(),
                message: "Material name cannot be empty".to_string(),
            });
        } else if !seen.insert(name.to_lowercase()) {
            issues.push(CatalogIssue {
                material: material.name.clone(),
                field: "name".to_string(),
                message: format!("Duplicate material name '{}'", name),
            });
        }

        if material.sustainability_score > MAX_SUSTAINABILITY_SCORE {
            issues.push(CatalogIssue {
                material: material.name.clone(),
                field: "sustainability_score".to_string(),
                message: format!(
                    "Sustainability score {} out of range (0-{})",
                    material.sustainability_score, MAX_SUSTAINABILITY_SCORE
                ),
            });
        }
    }

    issues
}
