//! Reading and validating `electron.toml`.

use crate::error::ConfigError;
use crate::types::ElectronConfig;
use std::path::Path;

/// Name of the configuration file inside a project directory.
pub const CONFIG_FILE: &str = "electron.toml";

/// Loads `<project_dir>/electron.toml`.
///
/// A missing file yields the default configuration; any other I/O problem
/// is an error.
pub fn load_config(project_dir: &Path) -> Result<ElectronConfig, ConfigError> {
    let path = project_dir.join(CONFIG_FILE);
    match std::fs::read_to_string(&path) {
        Ok(content) => load_config_from_str(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ElectronConfig::default()),
        Err(e) => Err(e.into()),
    }
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<ElectronConfig, ConfigError> {
    let config: ElectronConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Catalog keys are matched word by word, so a key must be a single word.
fn validate_config(config: &ElectronConfig) -> Result<(), ConfigError> {
    for key in config.catalog.parts.keys() {
        if key.is_empty() || key.chars().any(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "catalog key '{key}' must be a single non-empty word"
            )));
        }
    }
    Ok(())
}
