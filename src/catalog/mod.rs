//! Reference material catalog.
//!
//! The catalog is authored as TOML grouped by category (metals, polymers,
//! composites) and exposed only as one flattened, ordered list. It is loaded
//! once per process and never mutated afterwards.

mod loader;
mod types;
pub mod validation;

pub use loader::{all_materials, default_catalog, load_catalog, MaterialCatalog};
pub use types::*;
