//! Runs the installed ejson binary as a child process

use super::{ActionKind, CommandRunner, ExecutionResult};
use crate::errors::ActionError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct EjsonRunner {
    binary: PathBuf,
}

impl EjsonRunner {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }

    /// `<binary> <subcommand> <file_path>`; environment inherited as-is
    pub fn command(&self, action: ActionKind, file_path: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg(action.subcommand())
            .arg(file_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

#[async_trait]
impl CommandRunner for EjsonRunner {
    async fn run(
        &self,
        action: ActionKind,
        file_path: &Path,
    ) -> Result<ExecutionResult, ActionError> {
        log::info!("Running ejson {} {}", action, file_path.display());

        let output = self.command(action, file_path).output().await.map_err(|e| {
            ActionError::ExecutionError(format!(
                "Failed to run {}: {}",
                self.binary.display(),
                e
            ))
        })?;

        let result = ExecutionResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if !output.status.success() && result.stderr.is_empty() {
            log::warn!(
                "ejson {} exited with {:?} but wrote nothing to stderr",
                action,
                output.status.code()
            );
        }

        Ok(result)
    }
}
