//! Global petcal configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{PetcalError, PetcalResult};
use crate::storage::validate_key;

static DEFAULT_DATA_DIR: &str = "~/.local/share/petcal";
static DEFAULT_STORAGE_KEY: &str = "event-local-state";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

/// Global configuration at ~/.config/petcal/config.toml
///
/// Every key can be overridden with a `PETCAL_`-prefixed environment
/// variable, e.g. `PETCAL_DATA_DIR`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PetcalConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Name the overlay document is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for PetcalConfig {
    fn default() -> Self {
        PetcalConfig {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
        }
    }
}

impl PetcalConfig {
    pub fn config_path() -> PetcalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PetcalError::Config("Could not determine config directory".into()))?
            .join("petcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template first if
    /// there is no config file yet.
    pub fn load() -> PetcalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> PetcalResult<Self> {
        let config: PetcalConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("PETCAL"))
            .build()
            .map_err(|e| PetcalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PetcalError::Config(e.to_string()))?;

        validate_key(&config.storage_key)
            .map_err(|e| PetcalError::Config(format!("storage_key: {e}")))?;

        Ok(config)
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PetcalResult<()> {
        let contents = format!(
            "\
# petcal configuration

# Where local event state is kept:
# data_dir = \"{}\"

# File name (without .json) of the event state document:
# storage_key = \"{}\"
",
            DEFAULT_DATA_DIR, DEFAULT_STORAGE_KEY
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PetcalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PetcalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn to_toml(&self) -> PetcalResult<String> {
        toml::to_string_pretty(self).map_err(|e| PetcalError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("petcal/config.toml");

        PetcalConfig::create_default_config(&path).unwrap();
        let config = PetcalConfig::load_from(&path).unwrap();

        assert_eq!(config, PetcalConfig::default());
    }

    #[test]
    fn test_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/tmp/petcal-data\"\nstorage_key = \"overlay\"\n",
        )
        .unwrap();

        let config = PetcalConfig::load_from(&path).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/petcal-data"));
        assert_eq!(config.storage_key, "overlay");
        assert_eq!(config.data_path(), PathBuf::from("/tmp/petcal-data"));
    }

    #[test]
    fn test_invalid_storage_key_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "storage_key = \"../oops\"\n").unwrap();

        let err = PetcalConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, PetcalError::Config(_)));
    }

    #[test]
    fn test_to_toml() {
        let toml = PetcalConfig::default().to_toml().unwrap();
        assert!(toml.contains("storage_key = \"event-local-state\""));
    }
}
