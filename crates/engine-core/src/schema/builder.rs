use crate::{
    config::ImportConfig,
    error::ImportError,
    schema::sanitize::{ColumnName, sanitize},
};
use planner::{
    query::{
        ast::create_table::{ColumnDef, ColumnType, CreateTable},
        dialect::Dialect,
        render,
    },
    table_ref,
};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Ordered columns of the table to create, all typed as `VARCHAR(width)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    columns: Vec<ColumnName>,
    width: u32,
}

impl TableSchema {
    /// Sanitizes every raw name; duplicates are kept as they are.
    pub fn from_raw<I, S>(names: I, width: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            columns: names.into_iter().map(|n| sanitize(n.as_ref())).collect(),
            width,
        }
    }

    pub fn columns(&self) -> &[ColumnName] {
        &self.columns
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Identifiers that occur more than once, each reported once, in order.
    pub fn duplicates(&self) -> Vec<&ColumnName> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.columns
            .iter()
            .filter(|c| !seen.insert(c.as_str()) && reported.insert(c.as_str()))
            .collect()
    }

    pub fn create_table(&self, table: &str) -> CreateTable {
        CreateTable {
            table: table_ref!(table),
            columns: self
                .columns
                .iter()
                .map(|c| ColumnDef {
                    name: c.to_string(),
                    data_type: ColumnType::Varchar(self.width),
                })
                .collect(),
            if_not_exists: true,
        }
    }

    pub fn create_statement(&self, table: &str, dialect: &dyn Dialect) -> String {
        render(&self.create_table(table), dialect)
    }
}

/// Decides the table's columns: the explicit list when one is configured,
/// otherwise the sanitized first record of the source file.
pub fn build_schema(config: &ImportConfig) -> Result<TableSchema, ImportError> {
    let schema = if config.columns.is_empty() {
        let header = config
            .csv_source()
            .read_header()?
            .filter(|cells| !cells.is_empty())
            .ok_or_else(|| {
                ImportError::Schema(format!(
                    "{} has no header row to infer columns from",
                    config.source.display()
                ))
            })?;
        debug!("Header row: {:?}", header);
        TableSchema::from_raw(header, config.varchar_size)
    } else {
        debug!("Using configured columns: {:?}", config.columns);
        TableSchema::from_raw(&config.columns, config.varchar_size)
    };

    let duplicates = schema.duplicates();
    if !duplicates.is_empty() {
        let names = duplicates
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        if config.strict_columns {
            return Err(ImportError::Schema(format!(
                "duplicate column identifiers: {names}"
            )));
        }
        warn!("Duplicate column identifiers passed through: {}", names);
    }

    Ok(schema)
}
