//! Invocation of the external ejson binary.
//!
//! A run is judged by its standard error, not its exit status: any stderr
//! output is a failure even when the process exits 0, and empty stderr is a
//! success even when it does not. Callers relying on exit codes must not
//! assume the conventional rule here.

use async_trait::async_trait;
use crate::errors::ActionError;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub mod ejson;

pub use ejson::EjsonRunner;

/// The two subcommands the action can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Encrypt,
    Decrypt,
}

impl ActionKind {
    pub fn subcommand(&self) -> &'static str {
        match self {
            ActionKind::Encrypt => "encrypt",
            ActionKind::Decrypt => "decrypt",
        }
    }
}

impl FromStr for ActionKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "encrypt" => Ok(ActionKind::Encrypt),
            "decrypt" => Ok(ActionKind::Decrypt),
            other => Err(ActionError::InvalidAction(other.to_string())),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subcommand())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    /// Applies the stderr-wins policy
    pub fn into_stdout(self) -> Result<String, ActionError> {
        if self.stderr.is_empty() {
            Ok(self.stdout)
        } else {
            Err(ActionError::ExecutionError(self.stderr))
        }
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `action` against `file_path`. Only a failure to start the process is an
    /// error; use [`ExecutionResult::into_stdout`] to judge the captured output
    async fn run(&self, action: ActionKind, file_path: &Path)
        -> Result<ExecutionResult, ActionError>;
}
