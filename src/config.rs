use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants;
use crate::error::{MigrationError, Result};

/// Settings for a migration run. Every field has a default so an absent or
/// partial `coop_migrate.toml` is fine.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MigrationConfig {
    /// Country label written into the document metadata
    pub country: String,
    /// Source label written into the document metadata
    pub source: String,
    /// Year the directory data was collected
    pub data_year: i32,
    /// Report progress every N records
    pub progress_interval: usize,
    pub default_input: PathBuf,
    pub default_output: PathBuf,
    /// Seed for the simulated variation; random when unset
    pub seed: Option<u64>,
    pub log_dir: PathBuf,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            country: constants::DEFAULT_COUNTRY.to_string(),
            source: constants::DEFAULT_SOURCE.to_string(),
            data_year: constants::DEFAULT_DATA_YEAR,
            progress_interval: constants::DEFAULT_PROGRESS_INTERVAL,
            default_input: PathBuf::from(constants::DEFAULT_INPUT_FILE),
            default_output: PathBuf::from(constants::DEFAULT_OUTPUT_FILE),
            seed: None,
            log_dir: PathBuf::from(constants::DEFAULT_LOG_DIR),
        }
    }
}

impl MigrationConfig {
    /// Load from an explicit path (must exist), else from `coop_migrate.toml`
    /// if present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(constants::DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            MigrationError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "Loaded migration config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MigrationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.progress_interval == 0 {
            return Err(MigrationError::Config(
                "progress_interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_legacy_file_names() {
        let config = MigrationConfig::default();
        assert_eq!(config.default_input, PathBuf::from("cooperatives_cote_ivoire.json"));
        assert_eq!(config.default_output, PathBuf::from("cooperatives_enhanced.json"));
        assert_eq!(config.progress_interval, 100);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config = MigrationConfig::from_toml_str("seed = 42\ncountry = \"Ghana\"\n").unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.country, "Ghana");
        assert_eq!(config.data_year, 2017);
        assert_eq!(config.source, "AgroSoluce Platform");
    }

    #[test]
    fn zero_progress_interval_is_rejected() {
        let err = MigrationConfig::from_toml_str("progress_interval = 0").unwrap_err();
        assert!(matches!(err, MigrationError::Config(_)));
    }

    #[test]
    fn missing_explicit_file_is_a_config_error() {
        let err = MigrationConfig::load(Some(Path::new("/nonexistent/coop.toml"))).unwrap_err();
        assert!(matches!(err, MigrationError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "data_year = 2019\nlog_dir = \"var/log\"").unwrap();
        let config = MigrationConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.data_year, 2019);
        assert_eq!(config.log_dir, PathBuf::from("var/log"));
    }
}
