#![allow(dead_code)]

use async_trait::async_trait;
use connectors::sql::base::adapter::SqlAdapter;
use engine_core::{
    config::ImportConfig,
    error::ImportError,
    pipeline,
    report::ImportReport,
    script::{ScriptOutput, ScriptRunner, ScriptTarget},
};
use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

/// Three people, one of them with a quote in the surname.
pub const PEOPLE_CSV: &str = "\
Full Name,E-Mail,Age
Ann Lee,ann@example.com,31
Bob O'Neil,bob@example.com,45
Cy Twombly,cy@example.com,72
";

/// Writes `contents` to `<dir>/<name>` and returns the path.
pub fn write_csv(dir: &TempDir, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write csv fixture");
    path
}

/// Config for importing `path` into database `test`, table `table`.
pub fn config_for(path: &Path, table: &str) -> ImportConfig {
    ImportConfig::new(path, "test", table)
}

pub async fn run_import(
    config: &ImportConfig,
    adapter: &dyn SqlAdapter,
) -> Result<ImportReport, ImportError> {
    run_import_with(config, adapter, &StubScriptRunner::silent()).await
}

pub async fn run_import_with(
    config: &ImportConfig,
    adapter: &dyn SqlAdapter,
    runner: &dyn ScriptRunner,
) -> Result<ImportReport, ImportError> {
    pipeline::run(config, adapter, runner, CancellationToken::new()).await
}

/// Records scripts it was asked to run and answers with a canned output.
pub struct StubScriptRunner {
    output: ScriptOutput,
    calls: Mutex<Vec<PathBuf>>,
}

impl StubScriptRunner {
    pub fn silent() -> Self {
        Self::with_output(ScriptOutput {
            success: true,
            ..Default::default()
        })
    }

    pub fn with_output(output: ScriptOutput) -> Self {
        Self {
            output,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScriptRunner for StubScriptRunner {
    async fn execute_script(
        &self,
        path: &Path,
        _target: &ScriptTarget,
    ) -> Result<ScriptOutput, ImportError> {
        self.calls.lock().unwrap().push(path.to_path_buf());
        Ok(self.output.clone())
    }
}
