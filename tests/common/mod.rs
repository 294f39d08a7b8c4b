//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which lays out a small media library in a temp
//! directory, scans it with the real walker and wraps the resulting catalog
//! in an [`AppContext`]. The [`TestHarness::with_server`] constructor starts
//! Axum on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use vidshelf::catalog::CatalogStore;
use vidshelf::scanner::{build_catalog, ScanSummary, WalkDirLister};
use vidshelf::server::{create_router, AppContext};

pub const ABC_VIDEO: &[u8] = b"abc video bytes";
pub const ABC_POSTER: &[u8] = b"abc poster";

/// Library layout shared by the HTTP tests:
///
/// | file                       | outcome                    |
/// |----------------------------|----------------------------|
/// | a/ABC-123.mp4              | video, paired              |
/// | a/posters/abc123pl.jpg     | poster, paired             |
/// | b/DEF-456-HD.mkv           | video, paired              |
/// | b/DEF-456.png              | poster, paired             |
/// | b/GHI-789.mp4              | video without poster       |
/// | a/JKL-1.webp               | poster without video       |
/// | a/trailer.mp4              | unmatched                  |
/// | a/notes.txt                | ignored                    |
pub fn write_library(root: &Path) {
    let files: [(&str, &[u8]); 8] = [
        ("a/ABC-123.mp4", ABC_VIDEO),
        ("a/posters/abc123pl.jpg", ABC_POSTER),
        ("b/DEF-456-HD.mkv", b"def video"),
        ("b/DEF-456.png", b"def poster"),
        ("b/GHI-789.mp4", b"ghi video"),
        ("a/JKL-1.webp", b"jkl poster"),
        ("a/trailer.mp4", b"trailer"),
        ("a/notes.txt", b"notes"),
    ];
    for (rel, contents) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
}

pub fn library_roots(root: &Path) -> Vec<PathBuf> {
    vec![root.join("a"), root.join("b")]
}

/// Test harness wrapping a scanned catalog and its [`AppContext`].
pub struct TestHarness {
    pub ctx: AppContext,
    pub summary: ScanSummary,
    pub media: TempDir,
}

impl TestHarness {
    /// Build the fixture library and scan it.
    pub async fn new() -> Self {
        let media = tempfile::tempdir().expect("failed to create temp dir");
        write_library(media.path());

        let store = Arc::new(CatalogStore::new());
        let summary = build_catalog(
            store.clone(),
            Arc::new(WalkDirLister::new()),
            library_roots(media.path()),
        )
        .await;

        let ctx = AppContext::new(store);
        Self {
            ctx,
            summary,
            media,
        }
    }

    pub fn router(&self) -> Router {
        create_router(self.ctx.clone(), None)
    }

    /// Send a GET through the router without binding a socket.
    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new().await;
        let app = harness.router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("body is not JSON")
}
