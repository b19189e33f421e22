use crate::error::ImportError;
use async_trait::async_trait;
use connectors::sql::mysql::params::ConnectionInfo;
use std::{path::Path, process::Stdio};
use tokio::process::Command;
use tracing::debug;

/// Connection details a script runs against.
#[derive(Debug, Clone)]
pub struct ScriptTarget {
    pub connection: ConnectionInfo,
    pub database: String,
}

/// What a script run printed and whether it exited cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ScriptOutput {
    /// Everything the run reported, trimmed. Empty means silent.
    pub fn diagnostics(&self) -> String {
        [self.stdout.trim(), self.stderr.trim()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Executes a SQL script file against the target database.
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    async fn execute_script(
        &self,
        path: &Path,
        target: &ScriptTarget,
    ) -> Result<ScriptOutput, ImportError>;
}

/// Pipes the script into the `mysql` command-line client.
#[derive(Debug, Clone)]
pub struct MySqlClientRunner {
    program: String,
}

impl Default for MySqlClientRunner {
    fn default() -> Self {
        Self {
            program: "mysql".to_string(),
        }
    }
}

impl MySqlClientRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl ScriptRunner for MySqlClientRunner {
    async fn execute_script(
        &self,
        path: &Path,
        target: &ScriptTarget,
    ) -> Result<ScriptOutput, ImportError> {
        let script = std::fs::File::open(path)
            .map_err(|e| ImportError::ExternalProcess(format!("{}: {e}", path.display())))?;

        debug!(
            "Running {} < {} against {}",
            self.program,
            path.display(),
            target.connection.display_url(Some(&target.database))
        );

        let mut command = Command::new(&self.program);
        command
            .arg(format!("--host={}", target.connection.host))
            .arg(format!("--port={}", target.connection.port))
            .arg(format!("--user={}", target.connection.user))
            .arg(&target.database)
            .stdin(Stdio::from(script))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        // Keeps the password off the command line and avoids the client's
        // insecure-password warning on stderr.
        if !target.connection.password.is_empty() {
            command.env("MYSQL_PWD", &target.connection.password);
        }

        let output = command.output().await.map_err(|e| {
            ImportError::ExternalProcess(format!("failed to launch `{}`: {e}", self.program))
        })?;

        Ok(ScriptOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
