use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectorError {
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Task error: {0}")]
    Task(String),
}
