//! One encrypt or decrypt run from inputs to result
//!
//! A run validates its inputs on construction, then always resolves and
//! reinstalls the binary before dispatching on the action. Files written along
//! the way (binary, key, output copy) stay on disk if a later step fails.

use crate::config::types::{ActionInputs, ActionSettings};
use crate::errors::ActionError;
use crate::executors::{ActionKind, CommandRunner, EjsonRunner};
use crate::installation::{http_client, BinaryProvisioner, VersionResolver};
use crate::keys::KeyInstaller;
use crate::workflow::{GitHubOutputs, OutputSink};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DECRYPTED_OUTPUT: &str = "decrypted";

/// Validated inputs for a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub action: String,
    pub file_path: PathBuf,
    pub private_key: String,
    pub out_file: Option<PathBuf>,
    pub requested_version: String,
}

impl ActionRequest {
    /// Fails if the secrets file does not exist
    pub fn new(inputs: &ActionInputs) -> Result<Self, ActionError> {
        let file_path = PathBuf::from(&inputs.file_path);
        if !file_path.exists() {
            return Err(ActionError::InputValidationError(format!(
                "JSON file does not exist at path: {}",
                inputs.file_path
            )));
        }

        Ok(Self {
            action: inputs.action.clone(),
            file_path,
            private_key: inputs.private_key.clone(),
            out_file: Some(inputs.out_file.as_str())
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            requested_version: inputs.ejson_version.clone(),
        })
    }
}

pub struct EjsonAction {
    request: ActionRequest,
    settings: ActionSettings,
    resolver: VersionResolver,
    provisioner: BinaryProvisioner,
    keys: KeyInstaller,
    runner: Option<Arc<dyn CommandRunner>>,
    outputs: Arc<dyn OutputSink>,
}

impl EjsonAction {
    pub fn new(inputs: &ActionInputs, settings: ActionSettings) -> Result<Self, ActionError> {
        let request = ActionRequest::new(inputs)?;
        let client = http_client()?;

        Ok(Self {
            request,
            resolver: VersionResolver::new(client.clone(), settings.source.clone()),
            provisioner: BinaryProvisioner::new(
                client,
                settings.source.clone(),
                settings.paths.clone(),
            ),
            keys: KeyInstaller::new(settings.paths.key_dir.clone()),
            runner: None,
            outputs: Arc::new(GitHubOutputs::from_env()),
            settings,
        })
    }

    /// Replaces the runner built from the freshly installed binary
    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    pub fn with_outputs(mut self, outputs: Arc<dyn OutputSink>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Provisions the binary and runs the requested action, returning its stdout
    pub async fn run(&self) -> Result<String, ActionError> {
        let version = self.resolver.resolve(&self.request.requested_version).await?;
        let binary = self.provisioner.provision(&version).await?;

        let action: ActionKind = self.request.action.parse()?;
        let runner = self
            .runner
            .clone()
            .unwrap_or_else(|| Arc::new(EjsonRunner::new(binary)));

        if self.settings.debug {
            self.log_file_contents(action).await;
        }

        match action {
            ActionKind::Encrypt => self.encrypt(runner.as_ref()).await,
            ActionKind::Decrypt => self.decrypt(runner.as_ref()).await,
        }
    }

    async fn encrypt(&self, runner: &dyn CommandRunner) -> Result<String, ActionError> {
        runner
            .run(ActionKind::Encrypt, &self.request.file_path)
            .await?
            .into_stdout()
    }

    async fn decrypt(&self, runner: &dyn CommandRunner) -> Result<String, ActionError> {
        self.keys
            .install_key(&self.request.file_path, &self.request.private_key)
            .await?;

        let decrypted = runner
            .run(ActionKind::Decrypt, &self.request.file_path)
            .await?
            .into_stdout()?;

        if let Some(out_file) = &self.request.out_file {
            write_out_file(out_file, &decrypted).await?;
        }

        self.outputs.set_output(DECRYPTED_OUTPUT, &decrypted)?;
        Ok(decrypted)
    }

    async fn log_file_contents(&self, action: ActionKind) {
        match tokio::fs::read_to_string(&self.request.file_path).await {
            Ok(content) => log::info!(
                "Contents of {} before {}:\n{}",
                self.request.file_path.display(),
                action,
                content
            ),
            Err(e) => log::warn!(
                "Could not read {} for debug output: {}",
                self.request.file_path.display(),
                e
            ),
        }
    }
}

async fn write_out_file(path: &Path, content: &str) -> Result<(), ActionError> {
    tokio::fs::write(path, content).await.map_err(|e| {
        ActionError::IoError(format!("Failed to write {}: {}", path.display(), e))
    })?;
    log::info!("Decrypted output written to {}", path.display());
    Ok(())
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
