//! Selector configuration.
//!
//! Loaded from TOML, then overridden field-by-field from environment
//! variables. A missing config file is not an error: defaults apply.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::SelectorError;
use crate::selector::DEFAULT_TOP_N;

/// Env var naming an explicit config file path.
pub const CONFIG_PATH_ENV: &str = "MATERIAL_SELECTOR_CONFIG";
pub const TOP_N_ENV: &str = "MATERIAL_SELECTOR_TOP_N";
pub const DELAY_MS_ENV: &str = "MATERIAL_SELECTOR_DELAY_MS";

/// Stand-in latency for the analysis call until a real backend exists.
pub const DEFAULT_ANALYSIS_DELAY_MS: u64 = 1500;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Maximum number of ranked results
    pub top_n: usize,
    /// Artificial delay before an analysis completes
    pub analysis_delay_ms: u64,
    /// Alternate catalog file; the embedded catalog is used when unset
    pub catalog_path: Option<PathBuf>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            analysis_delay_ms: DEFAULT_ANALYSIS_DELAY_MS,
            catalog_path: None,
        }
    }
}

impl SelectorConfig {
    /// Parse TOML config content.
    pub fn from_toml_str(content: &str) -> Result<Self, SelectorError> {
        let config: SelectorConfig = toml::from_str(content)?;
        if config.top_n == 0 {
            return Err(SelectorError::Config(
                "top_n must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Read a config file. A missing file yields defaults.
    pub fn from_file(path: &Path) -> Result<Self, SelectorError> {
        if !path.exists() {
            info!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Resolve the config file, load it and apply environment overrides.
    ///
    /// An unreadable or invalid file is logged and replaced by defaults so
    /// the selector still starts.
    pub fn load() -> Self {
        let mut config = match default_config_path() {
            Some(path) => Self::from_file(&path).unwrap_or_else(|e| {
                warn!("Failed to load config {:?}: {}, using defaults", path, e);
                Self::default()
            }),
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Override fields from `lookup` (normally the process environment).
    /// Unparseable values are ignored with a warning.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(TOP_N_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => self.top_n = n,
                _ => warn!("Ignoring invalid {}={:?}", TOP_N_ENV, raw),
            }
        }
        if let Some(raw) = lookup(DELAY_MS_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.analysis_delay_ms = ms,
                Err(_) => warn!("Ignoring invalid {}={:?}", DELAY_MS_ENV, raw),
            }
        }
    }

    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }
}

/// `$MATERIAL_SELECTOR_CONFIG`, else `<config dir>/material-selector/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("material-selector").join("config.toml"))
}
