pub mod catalog;
pub mod config;
mod error;
pub mod query;
pub mod report;
pub mod selector;

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

pub use catalog::{all_materials, default_catalog, Material, MaterialCatalog};
pub use config::SelectorConfig;
pub use error::SelectorError;
pub use query::{AnalysisService, QueryOutcome, QuerySession, QueryState};
pub use selector::{rank, score_material, RequirementForm, RequirementSpec, ScoredMaterial};

/// Install the global tracing subscriber. `RUST_LOG` overrides the `info`
/// default. Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Command-line options for the driver binary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// Print results as JSON instead of text cards
    pub json: bool,
    /// Requirement JSON file; stdin when absent
    pub input: Option<PathBuf>,
}

impl CliOptions {
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = CliOptions::default();
        for arg in args {
            match arg.as_str() {
                "--json" => options.json = true,
                flag if flag.starts_with("--") => {
                    anyhow::bail!("Unknown option '{}'. Usage: material-selector [--json] [FILE]", flag)
                }
                path if options.input.is_none() => options.input = Some(PathBuf::from(path)),
                extra => anyhow::bail!("Unexpected argument '{}'", extra),
            }
        }
        Ok(options)
    }
}

/// Build the analysis service from configuration: custom catalog if one is
/// configured, the embedded catalog otherwise.
pub fn build_service(config: &SelectorConfig) -> Result<AnalysisService> {
    let catalog = match &config.catalog_path {
        Some(path) => catalog::load_catalog(path)?,
        None => default_catalog().clone(),
    };
    let engine = selector::SelectionEngine::new(Arc::new(catalog), config.top_n);
    Ok(AnalysisService::from_config(engine, config))
}

/// Driver entry: read one requirement form, run it through a query session
/// and print the outcome.
pub fn run() -> Result<()> {
    init_tracing();

    let options = CliOptions::parse(std::env::args().skip(1))?;
    let config = SelectorConfig::load();
    info!(
        "Starting material selector (top_n={}, delay={}ms)",
        config.top_n, config.analysis_delay_ms
    );

    let raw = match &options.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read requirements from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read requirements from stdin")?;
            buf
        }
    };
    let form: RequirementForm =
        serde_json::from_str(&raw).context("Requirements must be a JSON object")?;
    let req = RequirementSpec::from_form(&form);

    let service = build_service(&config)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let session = QuerySession::new(service);
    let outcome = runtime.block_on(session.run(req))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&outcome.state)?);
    } else {
        print!("{}", report::render_state(&outcome.state));
    }
    Ok(())
}
