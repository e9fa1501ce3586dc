//! Error types for every failure mode of an action run
//!
//! Each variant corresponds to one stage of the run: input validation, version
//! lookup, provisioning, key installation and execution of the external binary.
//! None of them are recovered locally; the caller logs the message and exits
//! non-zero, so the variants exist to make that message precise rather than to
//! drive retry logic.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("{0}")]
    InputValidationError(String),
    #[error("Failed to fetch the latest ejson version: {0}")]
    UpstreamUnavailable(String),
    #[error("Download failed: {0}")]
    DownloadError(String),
    #[error("Extraction failed: {0}")]
    ExtractionError(String),
    #[error("Failed to mark binary executable: {0}")]
    PermissionError(String),
    #[error("No provided private key for encryption")]
    MissingPrivateKey,
    #[error("Malformed secrets file: {0}")]
    MalformedSecretsFile(String),
    #[error("Not found public key in ejson file")]
    MissingPublicKey,
    #[error("{0}")]
    ExecutionError(String),
    #[error("invalid action '{0}'")]
    InvalidAction(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for ActionError {
    fn from(err: std::io::Error) -> Self {
        ActionError::IoError(err.to_string())
    }
}
