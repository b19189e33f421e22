//! Layered import settings: defaults, settings file, environment, flags.

pub mod env;
pub mod file;
pub mod resolve;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One configuration layer. Every field is optional so layers can be
/// stacked; [`ImportSettings::overlay`] lets the higher layer win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportSettings {
    pub csv: Option<PathBuf>,
    pub database: Option<String>,
    pub table: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub create: Option<bool>,
    pub truncate: Option<bool>,
    pub insert_ignore: Option<bool>,
    pub first_column_key: Option<bool>,
    pub columns: Option<Vec<String>>,
    pub custom_sql: Option<String>,
    pub varchar_size: Option<u32>,
    pub delimiter: Option<String>,
    pub strict_columns: Option<bool>,
    pub strict_row_shape: Option<bool>,
}

impl ImportSettings {
    /// Returns `self` with every value set in `higher` replaced by it.
    pub fn overlay(self, higher: ImportSettings) -> ImportSettings {
        ImportSettings {
            csv: higher.csv.or(self.csv),
            database: higher.database.or(self.database),
            table: higher.table.or(self.table),
            host: higher.host.or(self.host),
            port: higher.port.or(self.port),
            user: higher.user.or(self.user),
            password: higher.password.or(self.password),
            create: higher.create.or(self.create),
            truncate: higher.truncate.or(self.truncate),
            insert_ignore: higher.insert_ignore.or(self.insert_ignore),
            first_column_key: higher.first_column_key.or(self.first_column_key),
            columns: higher.columns.or(self.columns),
            custom_sql: higher.custom_sql.or(self.custom_sql),
            varchar_size: higher.varchar_size.or(self.varchar_size),
            delimiter: higher.delimiter.or(self.delimiter),
            strict_columns: higher.strict_columns.or(self.strict_columns),
            strict_row_shape: higher.strict_row_shape.or(self.strict_row_shape),
        }
    }
}
