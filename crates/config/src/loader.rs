use crate::error::ConfigError;
use crate::schema::{ValidationResult, validate};
use crate::types::Config;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

const DEFAULT_JSON: &str = include_str!("../../../assets/sshkeychain.default.json");

/// Returns the default config file path (~/.sshkeychain.json).
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".sshkeychain.json"))
}

/// Ensures the config file exists at `path`, creating a default one if missing.
///
/// # Errors
///
/// Returns an error if writing the default config file fails.
pub fn ensure_config_exists(path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        fs::write(path, DEFAULT_JSON)?;
        info!("created default config at {}", path.display());
    }

    Ok(())
}

/// Loads config from a string.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or fails schema validation.
pub fn load_from_str(s: &str) -> Result<Config, ConfigError> {
    s.parse()
}

/// Loads config from a specific path. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the config is invalid.
pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(path)?;
    load_from_str(&contents)
}

/// Loads config from the default path (~/.sshkeychain.json).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined or the config is invalid.
pub fn load() -> Result<Config, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoHomeDir)?;
    load_from_path(&path)
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s)?;

        if let ValidationResult::Invalid(errors) = validate(&value) {
            return Err(ConfigError::ValidationFailed(errors));
        }

        Ok(serde_json::from_value(value)?)
    }
}
