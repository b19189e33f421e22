use crate::{error::ConfigError, settings::ImportSettings};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

const DEFAULT_SETTINGS_DIR: &str = ".csvload";
const DEFAULT_SETTINGS_FILE: &str = "config.json";

/// `~/.csvload/config.json`, when a home directory can be determined.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_SETTINGS_DIR).join(DEFAULT_SETTINGS_FILE))
}

impl ImportSettings {
    /// Reads a JSON settings file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reads the explicit settings file if given, otherwise the default one
    /// if it exists. Having neither is not an error.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match default_settings_path() {
            Some(path) if path.is_file() => Self::from_file(path),
            _ => {
                debug!("No settings file found; using defaults");
                Ok(Self::default())
            }
        }
    }
}
