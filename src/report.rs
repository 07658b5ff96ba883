//! Plain-text rendering of ranked results.

use std::fmt::Write;

use crate::query::QueryState;
use crate::selector::ScoredMaterial;

/// Render one result as a text card:
///
/// ```text
/// Aluminum 6061  [Match: 30%]  (recyclable)
///   Strength: Medium      Up to 200°C
///   Corrosion: Excellent  Sustainability: 95%
///   Why this material: Suitable for application
///   Cost: Medium          Weight: Light
/// ```
pub fn render_card(scored: &ScoredMaterial) -> String {
    let m = &scored.material;
    let mut out = String::new();

    let recyclable = if m.recyclable { "  (recyclable)" } else { "" };
    let _ = writeln!(
        out,
        "{}  [Match: {}%]{}",
        m.name,
        scored.match_percent(),
        recyclable
    );
    let _ = writeln!(
        out,
        "  {:<20}  {}",
        format!("Strength: {}", m.strength),
        m.temperature_rating
    );
    let _ = writeln!(
        out,
        "  {:<20}  Sustainability: {}%",
        format!("Corrosion: {}", m.corrosion_resistance),
        m.sustainability_score
    );
    let _ = writeln!(out, "  Why this material: {}", scored.reasons.join(", "));
    let _ = writeln!(
        out,
        "  {:<20}  Weight: {}",
        format!("Cost: {}", m.cost),
        m.weight
    );

    out
}

/// Render a whole query state: the status line, then one card per result.
pub fn render_state(state: &QueryState) -> String {
    let mut out = state.summary();
    out.push('\n');

    if let Some(results) = state.results() {
        for (i, scored) in results.iter().enumerate() {
            let _ = write!(out, "\n{}. {}", i + 1, render_card(scored));
        }
    }

    out
}
