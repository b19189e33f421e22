use connectors::error::AdapterError;
use engine_config::error::ConfigError;
use engine_core::error::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read env file: {0}")]
    EnvFile(String),

    #[error("Failed to connect: {0}")]
    Adapter(#[from] AdapterError),

    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error("Failed to write the report: {0}")]
    ReportWrite(#[from] std::io::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// MySQL driver error.
    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl CliError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CliError::Import(ImportError::Cancelled(_)))
    }
}
