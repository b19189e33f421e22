use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while assembling the import configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON for the expected shape.
    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No CSV file was supplied by any configuration layer.
    #[error("No CSV file given")]
    MissingCsv,

    /// The CSV path does not name a readable file.
    #[error("Cannot find your csv file: {0}")]
    CsvNotFound(PathBuf),

    /// A value is present but unusable.
    #[error("Invalid value for `{key}`: {reason}")]
    InvalidValue { key: String, reason: String },
}

impl ConfigError {
    pub fn invalid(key: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
