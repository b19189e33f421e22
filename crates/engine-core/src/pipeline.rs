use crate::{
    config::ImportConfig,
    error::{ImportError, Stage},
    key::inject_key,
    loader::{LoadOptions, load_rows},
    post_process::run_post_load,
    provision::provision,
    report::{ImportReport, PipelineState},
    script::{ScriptRunner, ScriptTarget},
};
use chrono::Utc;
use connectors::sql::base::adapter::SqlAdapter;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Runs one import start to finish:
/// provision, load, optional key injection, optional post-load SQL.
pub async fn run(
    config: &ImportConfig,
    adapter: &dyn SqlAdapter,
    runner: &dyn ScriptRunner,
    cancel: CancellationToken,
) -> Result<ImportReport, ImportError> {
    let mut pipeline = ImportPipeline {
        config,
        adapter,
        runner,
        cancel,
        state: PipelineState::Start,
    };

    match pipeline.execute().await {
        Ok(report) => Ok(report),
        Err(err) => {
            error!("Import halted in state {}: {}", pipeline.state, err);
            Err(err)
        }
    }
}

struct ImportPipeline<'a> {
    config: &'a ImportConfig,
    adapter: &'a dyn SqlAdapter,
    runner: &'a dyn ScriptRunner,
    cancel: CancellationToken,
    state: PipelineState,
}

impl ImportPipeline<'_> {
    async fn execute(&mut self) -> Result<ImportReport, ImportError> {
        let started_at = Utc::now();
        let start = std::time::Instant::now();
        let config = self.config;

        info!(
            "Importing {} into `{}`.`{}`",
            config.source.display(),
            config.database,
            config.table
        );

        let provisioned = provision(config, self.adapter).await?;
        self.advance(PipelineState::Provisioned);

        let options = LoadOptions {
            insert_ignore: config.insert_ignore,
            expected_columns: if config.strict_row_shape {
                provisioned.column_count
            } else {
                None
            },
        };
        let summary = load_rows(
            &config.csv_source(),
            &config.table,
            self.adapter,
            options,
            &self.cancel,
        )
        .await?;
        self.advance(PipelineState::Loaded);

        let key_column = if provisioned.key_injection {
            self.check_cancelled(Stage::KeyInjection)?;
            let column = inject_key(&config.table, self.adapter).await?;
            self.advance(PipelineState::KeyInjected);
            Some(column)
        } else {
            None
        };

        self.check_cancelled(Stage::PostLoad)?;
        let target = ScriptTarget {
            connection: config.connection.clone(),
            database: config.database.clone(),
        };
        let post_load = run_post_load(
            config.custom_sql.as_deref(),
            &target,
            self.adapter,
            self.runner,
        )
        .await?;
        self.advance(PipelineState::PostProcessed);
        self.advance(PipelineState::Done);

        let elapsed = start.elapsed();
        info!("Done. Import finished in {:.2}s", elapsed.as_secs_f64());

        Ok(ImportReport {
            database: config.database.clone(),
            table: config.table.clone(),
            source: config.source.display().to_string(),
            columns: provisioned.schema.map(|s| s.columns().to_vec()),
            rows_loaded: summary.rows,
            rows_ignored: summary.ignored,
            key_column,
            post_load,
            state: self.state,
            started_at,
            finished_at: Utc::now(),
            elapsed_secs: elapsed.as_secs_f64(),
        })
    }

    fn advance(&mut self, next: PipelineState) {
        info!("Import state: {} -> {}", self.state, next);
        self.state = next;
    }

    fn check_cancelled(&self, stage: Stage) -> Result<(), ImportError> {
        if self.cancel.is_cancelled() {
            info!("Shutdown requested before {}", stage);
            return Err(ImportError::Cancelled(stage));
        }
        Ok(())
    }
}
