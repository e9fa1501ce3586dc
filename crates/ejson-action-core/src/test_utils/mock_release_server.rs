// src/test_utils/mock_release_server.rs
use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use crate::config::types::ReleaseSource;

/// A published release and the archive served for it
#[derive(Debug, Clone)]
pub struct MockRelease {
    pub version: String,
    pub archive: Vec<u8>,
}

impl MockRelease {
    /// Release whose archive holds an `ejson` script echoing its arguments
    pub fn new(version: &str) -> Self {
        let script = format!("#!/bin/sh\necho \"ejson {} $@\"\n", version);
        let archive = tarball(&[
            ("ejson", script.as_bytes(), 0o644),
            ("LICENSE.txt", b"MIT".as_slice(), 0o644),
        ]);
        Self::with_archive(version, archive)
    }

    pub fn with_archive(version: &str, archive: Vec<u8>) -> Self {
        Self {
            version: version.to_string(),
            archive,
        }
    }
}

/// Builds a gzip'd tarball from `(path, content, mode)` entries
pub fn tarball(entries: &[(&str, &[u8], u32)]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (path, content, mode) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(*mode);
        header.set_cksum();
        builder.append_data(&mut header, path, *content).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

#[derive(Clone)]
struct MockServerState {
    latest_tag: Option<String>,
    releases: Arc<HashMap<String, MockRelease>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServerState {
    fn record(&self, uri: &Uri) {
        self.requests.lock().unwrap().push(uri.path().to_string());
    }
}

async fn latest_release_handler(
    State(state): State<MockServerState>,
    uri: Uri,
) -> impl IntoResponse {
    state.record(&uri);
    match &state.latest_tag {
        Some(tag) => Json(json!({ "tag_name": tag, "name": tag })),
        None => Json(json!({ "message": "no releases" })),
    }
}

async fn release_tag_handler(
    State(state): State<MockServerState>,
    Path((_owner, _repo, tag)): Path<(String, String, String)>,
    uri: Uri,
) -> StatusCode {
    state.record(&uri);
    let version = tag.strip_prefix('v').unwrap_or(&tag);
    if state.releases.contains_key(version) {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn release_download_handler(
    State(state): State<MockServerState>,
    Path((_owner, _repo, tag, asset)): Path<(String, String, String, String)>,
    uri: Uri,
) -> Result<Vec<u8>, StatusCode> {
    state.record(&uri);
    let version = tag.strip_prefix('v').unwrap_or(&tag);
    match state.releases.get(version) {
        Some(release) if asset == format!("ejson_{}_linux_amd64.tar.gz", version) => {
            Ok(release.archive.clone())
        }
        _ => Err(StatusCode::NOT_FOUND),
    }
}

/// Local stand-in for both the releases API and the release download host
pub struct MockReleaseServer {
    addr: SocketAddr,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
    recorded_requests: Arc<Mutex<Vec<String>>>,
}

impl MockReleaseServer {
    pub async fn start(latest_tag: Option<&str>, releases: Vec<MockRelease>) -> Self {
        let state = MockServerState {
            latest_tag: latest_tag.map(str::to_string),
            releases: Arc::new(
                releases
                    .into_iter()
                    .map(|r| (r.version.clone(), r))
                    .collect(),
            ),
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let recorded_requests = state.requests.clone();

        let app = Router::new()
            .route(
                "/repos/{owner}/{repo}/releases/latest",
                get(latest_release_handler),
            )
            .route("/{owner}/{repo}/releases/tag/{tag}", get(release_tag_handler))
            .route(
                "/{owner}/{repo}/releases/download/{tag}/{asset}",
                get(release_download_handler),
            )
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap_or_else(|e| {
            panic!("Failed to bind mock server to 127.0.0.1:0. Error: {}", e);
        });
        let addr = listener.local_addr().unwrap();
        log::info!("Mock release server listening on {}", addr);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap_or_else(|e| {
                    log::error!("Mock release server error: {}", e);
                });
        });

        MockReleaseServer {
            addr,
            shutdown_tx,
            recorded_requests,
        }
    }

    pub fn address(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Release coordinates pointing both hosts at this server
    pub fn release_source(&self) -> ReleaseSource {
        ReleaseSource {
            api_base: self.address(),
            web_base: self.address(),
            ..ReleaseSource::default()
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.recorded_requests.lock().unwrap().clone()
    }

    pub fn requests_matching(&self, fragment: &str) -> usize {
        self.requests()
            .iter()
            .filter(|path| path.contains(fragment))
            .count()
    }

    pub async fn shutdown(self) {
        if self.shutdown_tx.send(()).is_err() {
            log::warn!("Mock release server shutdown signal already sent or receiver dropped.");
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }
}
