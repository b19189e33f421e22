use connectors::{
    file::csv::{settings::CsvSettings, source::CsvSource},
    sql::mysql::params::ConnectionInfo,
};
use std::path::PathBuf;

pub const DEFAULT_VARCHAR_SIZE: u32 = 255;

/// Everything one import run needs, resolved once before the run starts.
///
/// Components receive it by reference and never mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub source: PathBuf,
    pub database: String,
    pub table: String,
    pub connection: ConnectionInfo,

    /// (Re)build the table from the header row.
    pub create: bool,
    /// Empty an existing table before loading. Only consulted when `create` is off.
    pub truncate: bool,
    /// Use `INSERT IGNORE` so duplicate-key rows are dropped silently.
    pub insert_ignore: bool,
    /// Add `<table>_id` as an auto-increment primary key after the load.
    pub first_column_key: bool,
    /// Column names overriding the header row when non-empty.
    pub columns: Vec<String>,
    pub varchar_size: u32,
    /// Inline SQL, or the path of a script, to run after the load.
    pub custom_sql: Option<String>,

    pub delimiter: u8,
    /// Reject duplicate column identifiers instead of passing them to the database.
    pub strict_columns: bool,
    /// Reject data rows whose field count differs from the table's column count.
    pub strict_row_shape: bool,
}

impl ImportConfig {
    pub fn new(source: impl Into<PathBuf>, database: &str, table: &str) -> Self {
        Self {
            source: source.into(),
            database: database.to_string(),
            table: table.to_string(),
            connection: ConnectionInfo::default(),
            create: true,
            truncate: true,
            insert_ignore: false,
            first_column_key: true,
            columns: Vec::new(),
            varchar_size: DEFAULT_VARCHAR_SIZE,
            custom_sql: None,
            delimiter: b',',
            strict_columns: false,
            strict_row_shape: false,
        }
    }

    pub fn csv_settings(&self) -> CsvSettings {
        CsvSettings {
            delimiter: self.delimiter,
            has_header: true,
        }
    }

    pub fn csv_source(&self) -> CsvSource {
        CsvSource::new(&self.source, self.csv_settings())
    }

    /// The surrogate key only goes onto tables this run created.
    pub fn key_injection_enabled(&self) -> bool {
        self.first_column_key && self.create
    }
}
