use connectors::{file::csv::error::FileError, sql::base::error::DbError};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The database-facing steps of an import, used to say where a statement failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    DropTable,
    CreateTable,
    Truncate,
    Inspect,
    Load,
    KeyInjection,
    PostLoad,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::DropTable => "drop table",
            Stage::CreateTable => "create table",
            Stage::Truncate => "truncate table",
            Stage::Inspect => "inspect table",
            Stage::Load => "load rows",
            Stage::KeyInjection => "inject primary key",
            Stage::PostLoad => "post-load sql",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every way an import can fail. All of them are fatal: nothing is retried
/// and statements that already ran stay applied.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The source file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] FileError),

    /// The header (or explicit column list) cannot produce a table.
    #[error("Schema error: {0}")]
    Schema(String),

    /// `create` is off and there is no table to load into.
    #[error("Table `{0}` does not exist and table creation is disabled")]
    MissingTable(String),

    /// A DDL or post-load statement failed.
    #[error("SQL error during {stage}: {source}")]
    Sql {
        stage: Stage,
        #[source]
        source: DbError,
    },

    /// A single row insert failed; rows before it remain in the table.
    #[error("Error adding data at row {row} (line {line}): {source}")]
    Insert {
        row: u64,
        line: u64,
        #[source]
        source: DbError,
    },

    /// A data row does not match the table's column count.
    #[error("Row {row} (line {line}) has {found} fields, table has {expected} columns")]
    RowShape {
        row: u64,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// The post-load script could not run or reported a problem.
    #[error("Post-load script failed: {0}")]
    ExternalProcess(String),

    /// An operator interrupted the run.
    #[error("Import cancelled during {0}")]
    Cancelled(Stage),
}

impl ImportError {
    pub fn sql(stage: Stage) -> impl FnOnce(DbError) -> ImportError {
        move |source| ImportError::Sql { stage, source }
    }
}
