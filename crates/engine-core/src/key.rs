use crate::error::{ImportError, Stage};
use connectors::sql::base::adapter::SqlAdapter;
use planner::{
    query::{builder::alter_table::AddKeyColumnBuilder, render},
    table_ref,
};
use tracing::{debug, info};

pub fn key_column_name(table: &str) -> String {
    format!("{table}_id")
}

/// Adds `<table>_id` as the table's first column: a NOT NULL auto-increment
/// integer primary key. Existing rows are numbered by the server.
pub async fn inject_key(table: &str, adapter: &dyn SqlAdapter) -> Result<String, ImportError> {
    let column = key_column_name(table);
    let alter = render(
        &AddKeyColumnBuilder::new(table_ref!(table), &column)
            .first()
            .build(),
        adapter.dialect(),
    );
    debug!("{}", alter);

    adapter
        .exec(&alter)
        .await
        .map_err(ImportError::sql(Stage::KeyInjection))?;

    info!("Added primary key `{}` to `{}`", column, table);
    Ok(column)
}
