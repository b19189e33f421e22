use crate::error::{ImportError, Stage};
use connectors::{file::csv::source::CsvSource, sql::base::adapter::SqlAdapter};
use planner::{
    query::{builder::insert::InsertBuilder, render},
    table_ref,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

const PROGRESS_EVERY: u64 = 1000;

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Emit `INSERT IGNORE` instead of `INSERT`.
    pub insert_ignore: bool,
    /// When set, rows with a different field count fail before reaching the database.
    pub expected_columns: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    /// Insert statements that completed successfully.
    pub rows: u64,
    /// Of those, rows the server discarded as duplicates under `INSERT IGNORE`.
    pub ignored: u64,
}

/// Streams every data record of `source` into `table`, one insert per row.
///
/// The header record is skipped by the source. The first failing row stops
/// the load; earlier rows stay committed. Cancellation is honoured between
/// rows.
pub async fn load_rows(
    source: &CsvSource,
    table: &str,
    adapter: &dyn SqlAdapter,
    options: LoadOptions,
    cancel: &CancellationToken,
) -> Result<LoadSummary, ImportError> {
    let mut summary = LoadSummary::default();
    let dialect = adapter.dialect();

    for record in source.records()? {
        if cancel.is_cancelled() {
            info!("Load interrupted after {} rows", summary.rows);
            return Err(ImportError::Cancelled(Stage::Load));
        }

        let row = record?;
        let row_number = summary.rows + 1;

        if let Some(expected) = options.expected_columns
            && row.fields.len() != expected
        {
            error!(
                "Row {} (line {}) has {} fields, expected {}",
                row_number,
                row.line,
                row.fields.len(),
                expected
            );
            return Err(ImportError::RowShape {
                row: row_number,
                line: row.line,
                expected,
                found: row.fields.len(),
            });
        }

        let insert = InsertBuilder::new(table_ref!(table))
            .ignore(options.insert_ignore)
            .values(row.fields)
            .build();
        let sql = render(&insert, dialect);

        let affected = adapter.exec(&sql).await.map_err(|source| {
            error!("Error adding data at row {}: {}", row_number, source);
            ImportError::Insert {
                row: row_number,
                line: row.line,
                source,
            }
        })?;

        summary.rows = row_number;
        if options.insert_ignore && affected == 0 {
            summary.ignored += 1;
        }

        debug!("Adding row: # {}", row_number);
        if row_number % PROGRESS_EVERY == 0 {
            info!("{} rows loaded into `{}`", row_number, table);
        }
    }

    info!(
        "Loaded {} rows into `{}` ({} ignored as duplicates)",
        summary.rows, table, summary.ignored
    );
    Ok(summary)
}
