//! Requirement-to-material matching and ranking.
//!
//! # Architecture
//!
//! - **Requirements**: raw form fields normalized into a `RequirementSpec`
//! - **Scoring**: five independent weighted criteria per material, each
//!   contributing a weight and a reason when satisfied
//! - **Ranking**: zero scores dropped, stable descending sort, bounded result
//!
//! # Example
//!
//! ```
//! use material_selector::catalog::all_materials;
//! use material_selector::selector::{rank, RequirementSpec, DEFAULT_TOP_N};
//!
//! let req = RequirementSpec::new().with_application("aerospace");
//! let results = rank(all_materials(), &req, DEFAULT_TOP_N);
//!
//! assert_eq!(results.len(), 4);
//! assert_eq!(results[0].material.name, "Aluminum 6061");
//! assert_eq!(results[0].reasons, vec!["Suitable for application"]);
//! ```

mod engine;
mod types;

pub use engine::{
    criterion_satisfied, rank, score_material, MatchScore, SelectionEngine, DEFAULT_TOP_N,
    SUSTAINABILITY_THRESHOLD,
};
pub use types::*;
