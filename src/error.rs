use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Could not find input file '{}'", path.display())]
    InputNotFound { path: PathBuf },

    #[error("JSON (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Metrics error: {0}")]
    Metrics(String),
}

impl MigrationError {
    /// Missing input is reported to the user differently from every other failure.
    pub fn is_input_not_found(&self) -> bool {
        matches!(self, MigrationError::InputNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, MigrationError>;
