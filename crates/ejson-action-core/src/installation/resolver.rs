//! Release version resolution
//!
//! An explicit version is trusted only if its release page answers; anything
//! else, malformed identifiers included, falls back to the newest release.

use crate::config::types::ReleaseSource;
use crate::errors::ActionError;
use crate::installation::release::{strip_version_prefix, LatestRelease};
use reqwest::Client;

pub const LATEST: &str = "latest";

#[derive(Debug, Clone)]
pub struct VersionResolver {
    client: Client,
    source: ReleaseSource,
}

impl VersionResolver {
    pub fn new(client: Client, source: ReleaseSource) -> Self {
        Self { client, source }
    }

    /// Turns the requested version input into a concrete release version
    pub async fn resolve(&self, requested: &str) -> Result<String, ActionError> {
        if requested.is_empty() || requested == LATEST {
            return self.latest().await;
        }

        match self.probe(requested).await {
            Ok(()) => {
                log::info!("Using requested ejson version {}", requested);
                Ok(requested.to_string())
            }
            Err(e) => {
                log::warn!(
                    "ejson version '{}' not found ({}), falling back to latest",
                    requested,
                    e
                );
                self.latest().await
            }
        }
    }

    /// Newest published release, tag prefix stripped
    pub async fn latest(&self) -> Result<String, ActionError> {
        let url = self.source.latest_release_url();
        log::debug!("Querying latest release from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ActionError::UpstreamUnavailable(e.to_string()))?;

        let release: LatestRelease = response
            .json()
            .await
            .map_err(|e| ActionError::UpstreamUnavailable(e.to_string()))?;

        let tag = release
            .tag_name
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ActionError::UpstreamUnavailable("release response has no tag_name".to_string())
            })?;

        let version = strip_version_prefix(&tag).to_string();
        log::info!("Latest ejson version is {}", version);
        Ok(version)
    }

    async fn probe(&self, version: &str) -> Result<(), reqwest::Error> {
        self.client
            .get(self.source.tag_url(version))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
