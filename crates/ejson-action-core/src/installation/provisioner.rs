//! Download, unpack and permission the ejson binary
//!
//! Every call reinstalls from scratch: the archive is fetched again, unpacked
//! over whatever is already in the install directory and re-permissioned. The
//! archive is not checked against any checksum or signature.

use crate::config::types::{InstallPaths, ReleaseSource};
use crate::errors::ActionError;
use crate::installation::release::ReleaseDescriptor;
use flate2::read::GzDecoder;
use futures_util::StreamExt;
use reqwest::Client;
use std::fs::File;
use std::path::{Path, PathBuf};
use tar::Archive;
use tokio::fs;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone)]
pub struct BinaryProvisioner {
    client: Client,
    source: ReleaseSource,
    paths: InstallPaths,
}

impl BinaryProvisioner {
    pub fn new(client: Client, source: ReleaseSource, paths: InstallPaths) -> Self {
        Self {
            client,
            source,
            paths,
        }
    }

    /// Installs `version` and returns the path of the executable
    pub async fn provision(&self, version: &str) -> Result<PathBuf, ActionError> {
        let release = ReleaseDescriptor::new(&self.source, version);
        let archive_path = self.paths.archive_path();
        let binary_path = self.paths.binary_path();

        log::info!("Downloading ejson {} from {}", release.tag, release.download_url);
        self.download(&release.download_url, &archive_path).await?;

        log::info!("Extracting {}", archive_path.display());
        extract_tar_gz(&archive_path, &self.paths.install_dir)?;

        make_executable(&binary_path).await?;

        log::info!("ejson {} installed at {}", release.tag, binary_path.display());
        Ok(binary_path)
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<(), ActionError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ActionError::DownloadError(e.to_string()))?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                ActionError::DownloadError(format!(
                    "Failed to create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut file = fs::File::create(dest).await.map_err(|e| {
            ActionError::DownloadError(format!("Failed to create {}: {}", dest.display(), e))
        })?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| ActionError::DownloadError(e.to_string()))?;
            file.write_all(&chunk).await.map_err(|e| {
                ActionError::DownloadError(format!("Failed to write {}: {}", dest.display(), e))
            })?;
        }
        file.flush()
            .await
            .map_err(|e| ActionError::DownloadError(e.to_string()))?;

        Ok(())
    }
}

fn extract_tar_gz(archive_path: &Path, dest: &Path) -> Result<(), ActionError> {
    let file = File::open(archive_path).map_err(|e| {
        ActionError::ExtractionError(format!("Failed to open {}: {}", archive_path.display(), e))
    })?;
    let mut archive = Archive::new(GzDecoder::new(file));
    archive
        .unpack(dest)
        .map_err(|e| ActionError::ExtractionError(e.to_string()))
}

async fn make_executable(binary_path: &Path) -> Result<(), ActionError> {
    let metadata = fs::metadata(binary_path).await.map_err(|e| {
        ActionError::PermissionError(format!("{}: {}", binary_path.display(), e))
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut permissions = metadata.permissions();
        permissions.set_mode(0o755);
        fs::set_permissions(binary_path, permissions)
            .await
            .map_err(|e| ActionError::PermissionError(format!("{}: {}", binary_path.display(), e)))?;
    }
    #[cfg(not(unix))]
    let _ = metadata;

    Ok(())
}
