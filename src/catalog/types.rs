//! Type definitions for the material catalog.
//!
//! Enum labels match the catalog TOML and the form option values, so the same
//! types serve TOML deserialization (catalog loading) and JSON serialization
//! (results handed to the presentation layer).

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// ATTRIBUTE CLASSES
// =============================================================================

/// Ordinal strength class, shared by materials and strength requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Strength {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High", alias = "very high", alias = "VeryHigh")]
    VeryHigh,
}

impl Strength {
    /// Ordinal rank used for "at least as strong as" comparisons.
    pub fn rank(self) -> u8 {
        match self {
            Strength::Low => 1,
            Strength::Medium => 2,
            Strength::High => 3,
            Strength::VeryHigh => 4,
        }
    }

    /// Parse a label case-insensitively ("very high", "High", ...).
    /// Unknown or empty labels return `None`.
    pub fn from_label(input: &str) -> Option<Strength> {
        match input.trim().to_lowercase().as_str() {
            "low" => Some(Strength::Low),
            "medium" => Some(Strength::Medium),
            "high" => Some(Strength::High),
            "very high" | "very-high" | "very_high" => Some(Strength::VeryHigh),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strength::Low => "Low",
            Strength::Medium => "Medium",
            Strength::High => "High",
            Strength::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrosionResistance {
    Poor,
    Good,
    Excellent,
}

impl CorrosionResistance {
    pub fn label(self) -> &'static str {
        match self {
            CorrosionResistance::Poor => "Poor",
            CorrosionResistance::Good => "Good",
            CorrosionResistance::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for CorrosionResistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Relative cost class. Nominal: it is displayed, never scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cost {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl Cost {
    pub fn label(self) -> &'static str {
        match self {
            Cost::Low => "Low",
            Cost::Medium => "Medium",
            Cost::High => "High",
            Cost::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Relative weight class. Nominal: it is displayed, never scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weight {
    #[serde(rename = "Very Light")]
    VeryLight,
    Light,
    Heavy,
}

impl Weight {
    pub fn label(self) -> &'static str {
        match self {
            Weight::VeryLight => "Very Light",
            Weight::Light => "Light",
            Weight::Heavy => "Heavy",
        }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// MATERIAL RECORD
// =============================================================================

/// One candidate material with fixed physical and sourcing attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Unique name within the catalog (e.g., "Aluminum 6061")
    pub name: String,
    pub strength: Strength,
    /// Descriptive only (e.g., "Up to 200°C"); never parsed
    pub temperature_rating: String,
    pub corrosion_resistance: CorrosionResistance,
    pub recyclable: bool,
    /// Sustainability rating, 0-100
    pub sustainability_score: u8,
    pub cost: Cost,
    pub weight: Weight,
    /// Free-text domain labels (e.g., "aerospace", "food processing")
    pub application_tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_rank_is_ordinal() {
        assert!(Strength::Low.rank() < Strength::Medium.rank());
        assert!(Strength::Medium.rank() < Strength::High.rank());
        assert!(Strength::High.rank() < Strength::VeryHigh.rank());
        assert_eq!(Strength::VeryHigh.rank(), 4);
    }

    #[test]
    fn test_strength_from_label() {
        assert_eq!(Strength::from_label("very high"), Some(Strength::VeryHigh));
        assert_eq!(Strength::from_label("Very High"), Some(Strength::VeryHigh));
        assert_eq!(Strength::from_label(" HIGH "), Some(Strength::High));
        assert_eq!(Strength::from_label("low"), Some(Strength::Low));
        assert_eq!(Strength::from_label(""), None);
        assert_eq!(Strength::from_label("extreme"), None);
    }

    #[test]
    fn test_material_deserialize_from_toml() {
        let toml_src = r#"
            name = "Titanium Ti-6Al-4V"
            strength = "Very High"
            temperature_rating = "Up to 400°C"
            corrosion_resistance = "Excellent"
            recyclable = true
            sustainability_score = 70
            cost = "Very High"
            weight = "Light"
            application_tags = ["aerospace", "medical", "marine"]
        "#;
        let material: Material = toml::from_str(toml_src).unwrap();
        assert_eq!(material.strength, Strength::VeryHigh);
        assert_eq!(material.cost, Cost::VeryHigh);
        assert_eq!(material.weight, Weight::Light);
        assert_eq!(material.application_tags.len(), 3);
    }

    #[test]
    fn test_material_serialize_uses_display_labels() {
        let material = Material {
            name: "Carbon Fiber Composite".to_string(),
            strength: Strength::VeryHigh,
            temperature_rating: "Up to 150°C".to_string(),
            corrosion_resistance: CorrosionResistance::Excellent,
            recyclable: false,
            sustainability_score: 40,
            cost: Cost::VeryHigh,
            weight: Weight::VeryLight,
            application_tags: vec!["aerospace".to_string()],
        };
        let json = serde_json::to_string(&material).unwrap();
        assert!(json.contains(r#""strength":"Very High""#));
        assert!(json.contains(r#""weight":"Very Light""#));
    }
}
