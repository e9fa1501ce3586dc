//! Release coordinates for the ejson binary

use crate::config::types::{ReleaseSource, BINARY_NAME};
use crate::errors::ActionError;
use serde::Deserialize;

const USER_AGENT: &str = concat!("ejson-action/", env!("CARGO_PKG_VERSION"));

/// A concrete release chosen for this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDescriptor {
    pub tag: String,
    pub download_url: String,
}

impl ReleaseDescriptor {
    pub fn new(source: &ReleaseSource, version: &str) -> Self {
        Self {
            tag: version.to_string(),
            download_url: source.download_url(version),
        }
    }
}

/// Subset of the latest-release API response
#[derive(Debug, Deserialize)]
pub(crate) struct LatestRelease {
    pub tag_name: Option<String>,
}

impl ReleaseSource {
    pub fn latest_release_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }

    pub fn tag_url(&self, version: &str) -> String {
        format!(
            "{}/{}/{}/releases/tag/v{}",
            self.web_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            version
        )
    }

    pub fn asset_name(&self, version: &str) -> String {
        format!("{}_{}_{}", BINARY_NAME, version, self.asset_suffix)
    }

    pub fn download_url(&self, version: &str) -> String {
        format!(
            "{}/{}/{}/releases/download/v{}/{}",
            self.web_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            version,
            self.asset_name(version)
        )
    }
}

/// Drops a single leading `v` from a release tag
pub fn strip_version_prefix(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// HTTP client shared by version resolution and download.
///
/// No request timeout is configured; a stalled upstream blocks the run.
pub fn http_client() -> Result<reqwest::Client, ActionError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ActionError::ConfigError(format!("Failed to create HTTP client: {}", e)))
}
