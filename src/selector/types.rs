//! Type definitions for requirement matching.
//!
//! `RequirementForm` mirrors the raw fields the input form submits;
//! `RequirementSpec` is its normalized, typed counterpart consumed by the
//! scoring engine. Output types serialize to JSON for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::catalog::{Material, Strength};

// =============================================================================
// REQUIREMENT ENUMERATIONS
// =============================================================================

/// Declared operating temperature band.
/// Collected from the user but not evaluated by scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureBand {
    /// Below 100°C
    Low,
    /// 100-300°C
    Medium,
    /// Above 300°C
    High,
}

impl TemperatureBand {
    pub fn from_label(input: &str) -> Option<TemperatureBand> {
        match input.trim().to_lowercase().as_str() {
            "low" => Some(TemperatureBand::Low),
            "medium" => Some(TemperatureBand::Medium),
            "high" => Some(TemperatureBand::High),
            _ => None,
        }
    }
}

/// Declared operating environment. Only `Corrosive` participates in scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Indoor/dry
    Normal,
    Humid,
    Corrosive,
    Marine,
}

impl Environment {
    pub fn from_label(input: &str) -> Option<Environment> {
        match input.trim().to_lowercase().as_str() {
            "normal" => Some(Environment::Normal),
            "humid" => Some(Environment::Humid),
            "corrosive" => Some(Environment::Corrosive),
            "marine" => Some(Environment::Marine),
            _ => None,
        }
    }
}

/// Required strength. A label that names no known class still counts as a
/// requirement, with rank 0, so every material meets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthRequirement {
    Level(Strength),
    Unrecognized,
}

impl StrengthRequirement {
    /// Parse a form value. Empty input means no requirement.
    pub fn from_label(input: &str) -> Option<StrengthRequirement> {
        if input.trim().is_empty() {
            return None;
        }
        Some(match Strength::from_label(input) {
            Some(level) => StrengthRequirement::Level(level),
            None => StrengthRequirement::Unrecognized,
        })
    }

    pub fn rank(self) -> u8 {
        match self {
            StrengthRequirement::Level(level) => level.rank(),
            StrengthRequirement::Unrecognized => 0,
        }
    }
}

impl From<Strength> for StrengthRequirement {
    fn from(level: Strength) -> Self {
        StrengthRequirement::Level(level)
    }
}

// =============================================================================
// INPUT TYPES
// =============================================================================

/// Raw requirement fields as submitted by the input form.
///
/// Select fields carry the option value (`""` when nothing is selected),
/// checkboxes carry booleans. Every field defaults to empty/false.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementForm {
    /// Free-text application (e.g., "aerospace")
    pub application: String,
    /// "", "low", "medium" or "high"
    pub temperature: String,
    /// "", "normal", "humid", "corrosive" or "marine"
    pub environment: String,
    /// "", "low", "medium", "high" or "very high"
    pub strength: String,
    /// "Prioritize sustainable materials"
    pub sustainability: bool,
    /// "Must be recyclable"
    pub recyclable: bool,
}

/// Normalized user constraints for a single query.
///
/// A value object: each query owns its own copy. Absent fields contribute
/// nothing to any score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementSpec {
    /// Matched case-insensitively against application tags; empty = not set
    pub application_query: String,
    pub temperature_band: Option<TemperatureBand>,
    pub environment: Option<Environment>,
    pub strength_level: Option<StrengthRequirement>,
    pub prioritize_sustainability: bool,
    pub require_recyclable: bool,
}

impl RequirementSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize raw form fields. Unrecognized temperature and environment
    /// values become `None`; an unrecognized strength stays set with rank 0.
    pub fn from_form(form: &RequirementForm) -> Self {
        Self {
            application_query: form.application.trim().to_string(),
            temperature_band: TemperatureBand::from_label(&form.temperature),
            environment: Environment::from_label(&form.environment),
            strength_level: StrengthRequirement::from_label(&form.strength),
            prioritize_sustainability: form.sustainability,
            require_recyclable: form.recyclable,
        }
    }

    pub fn with_application(mut self, query: impl Into<String>) -> Self {
        self.application_query = query.into().trim().to_string();
        self
    }

    pub fn with_temperature_band(mut self, band: TemperatureBand) -> Self {
        self.temperature_band = Some(band);
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn with_strength(mut self, strength: Strength) -> Self {
        self.strength_level = Some(StrengthRequirement::Level(strength));
        self
    }

    pub fn prioritize_sustainability(mut self, enabled: bool) -> Self {
        self.prioritize_sustainability = enabled;
        self
    }

    pub fn require_recyclable(mut self, enabled: bool) -> Self {
        self.require_recyclable = enabled;
        self
    }

    /// True when no field could contribute to a score.
    /// `temperature_band` is ignored because it is never scored.
    pub fn is_empty(&self) -> bool {
        self.application_query.is_empty()
            && self.strength_level.is_none()
            && self.environment != Some(Environment::Corrosive)
            && !self.prioritize_sustainability
            && !self.require_recyclable
    }
}

impl From<RequirementForm> for RequirementSpec {
    fn from(form: RequirementForm) -> Self {
        RequirementSpec::from_form(&form)
    }
}

// =============================================================================
// SCORING CRITERIA
// =============================================================================

/// The five scoring criteria, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    ApplicationFit,
    StrengthFit,
    CorrosiveEnvironment,
    Sustainability,
    Recyclability,
}

impl Criterion {
    /// All criteria in the fixed evaluation order.
    pub const ALL: [Criterion; 5] = [
        Criterion::ApplicationFit,
        Criterion::StrengthFit,
        Criterion::CorrosiveEnvironment,
        Criterion::Sustainability,
        Criterion::Recyclability,
    ];

    pub fn weight(self) -> u32 {
        match self {
            Criterion::ApplicationFit => 30,
            Criterion::StrengthFit => 25,
            Criterion::CorrosiveEnvironment => 20,
            Criterion::Sustainability => 15,
            Criterion::Recyclability => 10,
        }
    }

    /// Justification attached to a material when the criterion is satisfied.
    pub fn reason(self) -> &'static str {
        match self {
            Criterion::ApplicationFit => "Suitable for application",
            Criterion::StrengthFit => "Meets strength requirements",
            Criterion::CorrosiveEnvironment => "Excellent corrosion resistance",
            Criterion::Sustainability => "High sustainability rating",
            Criterion::Recyclability => "Fully recyclable",
        }
    }
}

/// Highest score a material can reach (every criterion satisfied).
pub const MAX_SCORE: u32 = 100;

// =============================================================================
// OUTPUT TYPES
// =============================================================================

/// A material annotated with its match score and justifications.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMaterial {
    /// All original catalog attributes
    #[serde(flatten)]
    pub material: Material,
    /// Sum of satisfied criterion weights (0-100)
    pub score: u32,
    /// One entry per satisfied criterion, in evaluation order
    pub reasons: Vec<String>,
}

impl ScoredMaterial {
    /// Score as the "Match: N%" figure shown to the user.
    pub fn match_percent(&self) -> u32 {
        self.score * 100 / MAX_SCORE
    }

    pub fn name(&self) -> &str {
        &self.material.name
    }
}
