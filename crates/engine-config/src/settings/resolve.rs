use crate::{error::ConfigError, settings::ImportSettings};
use connectors::sql::mysql::params::ConnectionInfo;
use engine_core::{
    config::{DEFAULT_VARCHAR_SIZE, ImportConfig},
    schema::sanitize::sanitize,
};
use std::path::Path;
use tracing::info;

/// MySQL's VARCHAR limit in characters.
const MAX_VARCHAR_SIZE: u32 = 65_535;

impl ImportSettings {
    /// Fills in defaults and derived names, validates values and freezes
    /// the result into an [`ImportConfig`].
    pub fn resolve(self) -> Result<ImportConfig, ConfigError> {
        let source = self.csv.ok_or(ConfigError::MissingCsv)?;
        if !source.is_file() {
            return Err(ConfigError::CsvNotFound(source));
        }

        let table = match self.table.filter(|t| !t.is_empty()) {
            Some(table) => table,
            None => {
                let derived = table_name_from_path(&source);
                info!("Creating table {}", derived);
                derived
            }
        };
        let database = match self.database.filter(|d| !d.is_empty()) {
            Some(database) => database,
            None => {
                info!("Creating database {}", table);
                table.clone()
            }
        };

        let defaults = ConnectionInfo::default();
        let connection = ConnectionInfo {
            host: self.host.unwrap_or(defaults.host),
            port: self.port.unwrap_or(defaults.port),
            user: self.user.unwrap_or(defaults.user),
            password: self.password.unwrap_or(defaults.password),
        };

        let varchar_size = self.varchar_size.unwrap_or(DEFAULT_VARCHAR_SIZE);
        if varchar_size == 0 || varchar_size > MAX_VARCHAR_SIZE {
            return Err(ConfigError::invalid(
                "varchar_size",
                format!("must be between 1 and {MAX_VARCHAR_SIZE}, got {varchar_size}"),
            ));
        }

        let delimiter = match self.delimiter.as_deref() {
            None => b',',
            Some(raw) => parse_delimiter(raw)?,
        };

        let mut config = ImportConfig::new(source, &database, &table);
        config.connection = connection;
        config.create = self.create.unwrap_or(config.create);
        config.truncate = self.truncate.unwrap_or(config.truncate);
        config.insert_ignore = self.insert_ignore.unwrap_or(config.insert_ignore);
        config.first_column_key = self.first_column_key.unwrap_or(config.first_column_key);
        config.columns = self.columns.unwrap_or_default();
        config.varchar_size = varchar_size;
        config.custom_sql = self.custom_sql.filter(|s| !s.trim().is_empty());
        config.delimiter = delimiter;
        config.strict_columns = self.strict_columns.unwrap_or(false);
        config.strict_row_shape = self.strict_row_shape.unwrap_or(false);
        Ok(config)
    }
}

/// Table name for a CSV path: the file name without a `.csv` extension,
/// sanitized like a header cell.
pub fn table_name_from_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = match file_name.len().checked_sub(4) {
        Some(cut)
            if file_name.is_char_boundary(cut)
                && file_name[cut..].eq_ignore_ascii_case(".csv") =>
        {
            &file_name[..cut]
        }
        _ => file_name.as_str(),
    };
    sanitize(stem).into_string()
}

fn parse_delimiter(raw: &str) -> Result<u8, ConfigError> {
    let raw = match raw {
        "\\t" | "tab" => "\t",
        other => other,
    };
    match raw.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(ConfigError::invalid(
            "delimiter",
            format!("expected a single ASCII character, got {raw:?}"),
        )),
    }
}
