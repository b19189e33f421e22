use crate::{
    error::{ImportError, Stage},
    script::{ScriptRunner, ScriptTarget},
};
use connectors::sql::base::adapter::SqlAdapter;
use serde::Serialize;
use std::path::Path;
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum PostLoad {
    Skipped,
    Inline(String),
    Script(String),
}

/// Runs the configured follow-up SQL once the load is complete.
///
/// A value naming an existing file is run as a script through `runner`;
/// any other non-blank value is executed verbatim on the import connection.
pub async fn run_post_load(
    custom_sql: Option<&str>,
    target: &ScriptTarget,
    adapter: &dyn SqlAdapter,
    runner: &dyn ScriptRunner,
) -> Result<PostLoad, ImportError> {
    let Some(sql) = custom_sql.filter(|s| !s.trim().is_empty()) else {
        return Ok(PostLoad::Skipped);
    };

    info!("Running post processing code");
    let path = Path::new(sql);
    let is_script = tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);

    if is_script {
        let output = runner.execute_script(path, target).await?;
        let diagnostics = output.diagnostics();
        if !output.success || !diagnostics.is_empty() {
            error!("Post-load script {} failed: {}", path.display(), diagnostics);
            return Err(ImportError::ExternalProcess(if diagnostics.is_empty() {
                format!("{} exited unsuccessfully", path.display())
            } else {
                diagnostics
            }));
        }
        info!("Post-load script {} completed", path.display());
        return Ok(PostLoad::Script(sql.to_string()));
    }

    adapter
        .exec(sql)
        .await
        .map_err(ImportError::sql(Stage::PostLoad))?;
    info!("Post-load SQL completed");
    Ok(PostLoad::Inline(sql.to_string()))
}
