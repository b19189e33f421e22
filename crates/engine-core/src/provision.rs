use crate::{
    config::ImportConfig,
    error::{ImportError, Stage},
    schema::builder::{TableSchema, build_schema},
};
use connectors::sql::base::adapter::SqlAdapter;
use planner::{
    query::{ast::truncate::Truncate, builder::drop_table::DropTableBuilder, render},
    table_ref,
};
use tracing::{debug, info, warn};

/// What provisioning left behind for the later stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provisioned {
    /// The schema the table was created with, when this run created it.
    pub schema: Option<TableSchema>,
    /// Column count data rows are expected to have, when known.
    pub column_count: Option<usize>,
    /// Whether the surrogate key may be added after the load.
    pub key_injection: bool,
}

/// Gets the target table ready for loading.
///
/// With `create` on, the table is dropped and rebuilt from the schema. With
/// it off, an existing table is optionally truncated and key injection is
/// disabled for the run.
pub async fn provision(
    config: &ImportConfig,
    adapter: &dyn SqlAdapter,
) -> Result<Provisioned, ImportError> {
    if config.create {
        recreate(config, adapter).await
    } else {
        reuse(config, adapter).await
    }
}

async fn recreate(
    config: &ImportConfig,
    adapter: &dyn SqlAdapter,
) -> Result<Provisioned, ImportError> {
    let dialect = adapter.dialect();

    let drop = render(
        &DropTableBuilder::new(table_ref!(config.table)).if_exists().build(),
        dialect,
    );
    debug!("{}", drop);
    adapter
        .exec(&drop)
        .await
        .map_err(ImportError::sql(Stage::DropTable))?;

    let schema = build_schema(config)?;
    let create = schema.create_statement(&config.table, dialect);
    debug!("{}", create);
    adapter
        .exec(&create)
        .await
        .map_err(ImportError::sql(Stage::CreateTable))?;

    info!(
        "Table `{}` is created with {} columns and ready",
        config.table,
        schema.len()
    );
    Ok(Provisioned {
        column_count: Some(schema.len()),
        schema: Some(schema),
        key_injection: config.key_injection_enabled(),
    })
}

async fn reuse(config: &ImportConfig, adapter: &dyn SqlAdapter) -> Result<Provisioned, ImportError> {
    let exists = adapter
        .table_exists(&config.table)
        .await
        .map_err(ImportError::sql(Stage::Inspect))?;
    if !exists {
        return Err(ImportError::MissingTable(config.table.clone()));
    }

    if config.truncate {
        let truncate = render(
            &Truncate {
                table: table_ref!(config.table),
            },
            adapter.dialect(),
        );
        debug!("{}", truncate);
        adapter
            .exec(&truncate)
            .await
            .map_err(ImportError::sql(Stage::Truncate))?;
        info!("Table `{}` truncated", config.table);
    } else {
        info!("Appending to existing table `{}`", config.table);
    }

    if config.first_column_key {
        warn!(
            "Primary key injection skipped: table `{}` was not created by this run",
            config.table
        );
    }

    let column_count = if config.strict_row_shape {
        let columns = adapter
            .column_names(&config.table)
            .await
            .map_err(ImportError::sql(Stage::Inspect))?;
        Some(columns.len())
    } else {
        None
    };

    Ok(Provisioned {
        schema: None,
        column_count,
        key_injection: config.key_injection_enabled(),
    })
}
