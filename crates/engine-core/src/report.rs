use crate::{post_process::PostLoad, schema::sanitize::ColumnName};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Linear progression of an import. A failure leaves the run in the last
/// state it reached; there is no way back to `Start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum PipelineState {
    Start,
    Provisioned,
    Loaded,
    KeyInjected,
    PostProcessed,
    Done,
}

impl PipelineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Start => "Start",
            PipelineState::Provisioned => "Provisioned",
            PipelineState::Loaded => "Loaded",
            PipelineState::KeyInjected => "KeyInjected",
            PipelineState::PostProcessed => "PostProcessed",
            PipelineState::Done => "Done",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of a finished import, printed as JSON by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub database: String,
    pub table: String,
    pub source: String,
    /// Columns the table was created with; absent when an existing table was reused.
    pub columns: Option<Vec<ColumnName>>,
    pub rows_loaded: u64,
    pub rows_ignored: u64,
    pub key_column: Option<String>,
    pub post_load: PostLoad,
    pub state: PipelineState,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_secs: f64,
}
