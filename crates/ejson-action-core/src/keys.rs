//! Private key installation for decryption
//!
//! ejson looks up the private key for a file in its key directory under a file
//! named after the file's `_public_key`. The key is written exactly as given and
//! left in place after the run.

use crate::errors::ActionError;
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

#[derive(Debug, Deserialize)]
struct SecretsHeader {
    #[serde(rename = "_public_key")]
    public_key: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct KeyInstaller {
    key_dir: PathBuf,
}

impl KeyInstaller {
    pub fn new(key_dir: PathBuf) -> Self {
        Self { key_dir }
    }

    /// Writes `private_key` to `<key_dir>/<public key of secrets_path>`
    pub async fn install_key(
        &self,
        secrets_path: &Path,
        private_key: &str,
    ) -> Result<PathBuf, ActionError> {
        if private_key.is_empty() {
            return Err(ActionError::MissingPrivateKey);
        }

        let public_key = read_public_key(secrets_path).await?;
        let key_path = self.key_path(&public_key)?;

        fs::create_dir_all(&self.key_dir).await?;
        fs::write(&key_path, private_key).await?;

        log::info!("Installed private key for public key {}", public_key);
        Ok(key_path)
    }

    /// The public key names a single file directly inside the key directory
    fn key_path(&self, public_key: &str) -> Result<PathBuf, ActionError> {
        let mut components = Path::new(public_key).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == public_key => {
                Ok(self.key_dir.join(name))
            }
            _ => Err(ActionError::MalformedSecretsFile(format!(
                "public key is not a valid key file name: {}",
                public_key
            ))),
        }
    }
}

/// Public key declared by a secrets file
pub async fn read_public_key(secrets_path: &Path) -> Result<String, ActionError> {
    let content = fs::read_to_string(secrets_path).await.map_err(|e| {
        ActionError::MalformedSecretsFile(format!("{}: {}", secrets_path.display(), e))
    })?;

    let header: SecretsHeader = serde_json::from_str(&content)
        .map_err(|e| ActionError::MalformedSecretsFile(e.to_string()))?;

    match header.public_key {
        Some(serde_json::Value::String(key)) if !key.is_empty() => Ok(key),
        _ => Err(ActionError::MissingPublicKey),
    }
}
