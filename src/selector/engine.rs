//! Scoring engine and ranking pipeline.
//!
//! `score_material` is a pure function of one material and one requirement
//! spec. `rank` applies it to a whole candidate list, drops non-matches,
//! orders the survivors and keeps the best `top_n`.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::{CorrosionResistance, Material, MaterialCatalog};

use super::types::*;

/// Number of results returned when the caller does not choose one.
pub const DEFAULT_TOP_N: usize = 5;

/// Minimum sustainability rating that satisfies the sustainability preference.
pub const SUSTAINABILITY_THRESHOLD: u8 = 80;

/// Score and justifications for one (material, requirement) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchScore {
    pub score: u32,
    /// One reason per satisfied criterion, in evaluation order
    pub reasons: Vec<String>,
}

/// Case-insensitive substring match in either direction between the trimmed
/// query and any of the material's application tags.
fn application_matches(material: &Material, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return false;
    }
    material.application_tags.iter().any(|tag| {
        let tag = tag.to_lowercase();
        tag.contains(&query) || query.contains(&tag)
    })
}

/// Whether a single criterion holds for the pair.
/// A criterion whose requirement field is unset never holds.
pub fn criterion_satisfied(
    criterion: Criterion,
    material: &Material,
    req: &RequirementSpec,
) -> bool {
    match criterion {
        Criterion::ApplicationFit => application_matches(material, &req.application_query),
        Criterion::StrengthFit => req
            .strength_level
            .map_or(false, |required| material.strength.rank() >= required.rank()),
        Criterion::CorrosiveEnvironment => {
            req.environment == Some(Environment::Corrosive)
                && material.corrosion_resistance == CorrosionResistance::Excellent
        }
        Criterion::Sustainability => {
            req.prioritize_sustainability
                && material.sustainability_score >= SUSTAINABILITY_THRESHOLD
        }
        Criterion::Recyclability => req.require_recyclable && material.recyclable,
    }
}

/// Score a material against a requirement spec.
///
/// Criteria are evaluated independently in their fixed order; each satisfied
/// criterion adds its weight and appends its reason. Never fails: unset
/// requirement fields simply contribute nothing.
pub fn score_material(material: &Material, req: &RequirementSpec) -> MatchScore {
    let mut result = MatchScore::default();

    for criterion in Criterion::ALL {
        if criterion_satisfied(criterion, material, req) {
            result.score += criterion.weight();
            result.reasons.push(criterion.reason().to_string());
        }
    }

    result
}

/// Rank candidate materials against a requirement spec.
///
/// 1. Score every material, preserving input order
/// 2. Discard zero scores
/// 3. Stable sort by score descending (input order breaks ties)
/// 4. Keep the first `top_n`
pub fn rank(materials: &[Material], req: &RequirementSpec, top_n: usize) -> Vec<ScoredMaterial> {
    let mut scored: Vec<ScoredMaterial> = materials
        .iter()
        .filter_map(|material| {
            let MatchScore { score, reasons } = score_material(material, req);
            debug!("Scored '{}': {} {:?}", material.name, score, reasons);
            if score > 0 {
                Some(ScoredMaterial {
                    material: material.clone(),
                    score,
                    reasons,
                })
            } else {
                None
            }
        })
        .collect();

    // `sort_by` is stable, which the tie-break depends on
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(top_n);

    scored
}

/// Ranking pipeline bound to a catalog and a result bound.
///
/// Cheap to clone and safe to share across tasks: the catalog is immutable
/// and every call works on its own requirement value.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    catalog: Arc<MaterialCatalog>,
    top_n: usize,
}

impl SelectionEngine {
    /// Create an engine over `catalog` returning at most `top_n` results.
    pub fn new(catalog: Arc<MaterialCatalog>, top_n: usize) -> Self {
        Self { catalog, top_n }
    }

    /// Engine over the embedded catalog with the default result bound.
    pub fn with_default_catalog() -> Self {
        Self::new(
            Arc::new(crate::catalog::default_catalog().clone()),
            DEFAULT_TOP_N,
        )
    }

    /// Rank the whole catalog against `req`.
    pub fn select(&self, req: &RequirementSpec) -> Vec<ScoredMaterial> {
        rank(self.catalog.all_materials(), req, self.top_n)
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }
}
