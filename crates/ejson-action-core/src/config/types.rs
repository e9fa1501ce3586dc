//! Configuration types for an action run

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_WEB_BASE: &str = "https://github.com";
pub const DEFAULT_REPOSITORY: &str = "Shopify/ejson";
pub const DEFAULT_ASSET_SUFFIX: &str = "linux_amd64.tar.gz";
pub const DEFAULT_INSTALL_DIR: &str = "/usr/local/bin";
pub const DEFAULT_KEY_DIR: &str = "/opt/ejson/keys";
pub const BINARY_NAME: &str = "ejson";

/// Raw inputs as supplied by the workflow step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionInputs {
    pub action: String,
    pub file_path: String,
    #[serde(default)]
    pub private_key: String,
    #[serde(default)]
    pub out_file: String,
    #[serde(default)]
    pub ejson_version: String,
}

/// Where releases of the binary are published
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseSource {
    /// Base URL of the REST API used for the latest-release query
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Base URL of the web host serving release pages and assets
    #[serde(default = "default_web_base")]
    pub web_base: String,
    pub owner: String,
    pub repo: String,
    #[serde(default = "default_asset_suffix")]
    pub asset_suffix: String,
}

impl Default for ReleaseSource {
    fn default() -> Self {
        let (owner, repo) = DEFAULT_REPOSITORY
            .split_once('/')
            .unwrap_or(("Shopify", "ejson"));
        Self {
            api_base: default_api_base(),
            web_base: default_web_base(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            asset_suffix: default_asset_suffix(),
        }
    }
}

/// Filesystem locations the run writes to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallPaths {
    #[serde(default = "default_install_dir")]
    pub install_dir: PathBuf,
    #[serde(default = "default_key_dir")]
    pub key_dir: PathBuf,
}

impl InstallPaths {
    pub fn binary_path(&self) -> PathBuf {
        self.install_dir.join(BINARY_NAME)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.install_dir.join(format!("{}.tar.gz", BINARY_NAME))
    }
}

impl Default for InstallPaths {
    fn default() -> Self {
        Self {
            install_dir: default_install_dir(),
            key_dir: default_key_dir(),
        }
    }
}

/// Everything besides the inputs that shapes a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSettings {
    #[serde(default)]
    pub source: ReleaseSource,
    #[serde(default)]
    pub paths: InstallPaths,
    /// Log secrets file contents before each action
    #[serde(default)]
    pub debug: bool,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_web_base() -> String {
    DEFAULT_WEB_BASE.to_string()
}

fn default_asset_suffix() -> String {
    DEFAULT_ASSET_SUFFIX.to_string()
}

fn default_install_dir() -> PathBuf {
    PathBuf::from(DEFAULT_INSTALL_DIR)
}

fn default_key_dir() -> PathBuf {
    PathBuf::from(DEFAULT_KEY_DIR)
}
