//! Catalog builder.
//!
//! Walks every configured root on its own blocking worker, classifies each
//! file by extension, normalizes its name and merges it into the shared
//! [`CatalogStore`]. [`build_catalog`] returns once every worker has finished.

pub mod lister;

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};
use vidshelf_common::{normalize, paths::classify, Identifier, MediaKind};

use crate::catalog::{CatalogStore, UpsertOutcome};
use crate::error::{Error, Result};

pub use lister::{FileIter, FileLister, FileRecord, MemoryLister, WalkDirLister};

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Extension is neither video nor image.
    Ignored,
    /// Recognized media file without an identifier.
    Unmatched,
    /// Merged into the catalog.
    Indexed(MediaKind, UpsertOutcome),
}

/// Counts for one root, logged when its worker finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RootScanReport {
    pub root: PathBuf,
    pub videos: usize,
    pub images: usize,
    pub unmatched: usize,
    pub duplicates: usize,
    pub walk_errors: usize,
}

impl RootScanReport {
    fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            ..Self::default()
        }
    }

    fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Ignored => {}
            FileOutcome::Unmatched => self.unmatched += 1,
            FileOutcome::Indexed(kind, upsert) => {
                match kind {
                    MediaKind::Video => self.videos += 1,
                    MediaKind::Image => self.images += 1,
                }
                if matches!(upsert, UpsertOutcome::Duplicate(_)) {
                    self.duplicates += 1;
                }
            }
        }
    }
}

/// Result of a full multi-root scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanSummary {
    /// One report per finished worker, sorted by root.
    pub roots: Vec<RootScanReport>,
    /// Workers that panicked before reporting.
    pub failed_workers: usize,
}

impl ScanSummary {
    pub fn walk_errors(&self) -> usize {
        self.roots.iter().map(|r| r.walk_errors).sum()
    }
}

/// Identifier for `file_name`, or [`Error::NoMatch`].
pub fn identify(file_name: &str) -> Result<Identifier> {
    normalize(file_name).ok_or_else(|| Error::NoMatch(file_name.to_string()))
}

/// Classify, normalize and merge one file.
pub fn index_file(store: &CatalogStore, record: FileRecord) -> FileOutcome {
    let Some(kind) = classify(&record.path) else {
        return FileOutcome::Ignored;
    };

    let id = match identify(&record.file_name) {
        Ok(id) => id,
        Err(e) => {
            debug!(path = %record.path.display(), error = %e, "Recording unmatched file");
            store.record_unmatched(record.path);
            return FileOutcome::Unmatched;
        }
    };

    debug!(kind = %kind, id = %id, path = %record.path.display(), "Found media file");
    let upsert = store.upsert(id, kind, record.path);
    if let UpsertOutcome::Duplicate(dup) = &upsert {
        warn!(
            id = %dup.id,
            kind = %dup.kind,
            kept = %dup.kept.display(),
            discarded = %dup.discarded.display(),
            "Duplicate file for identifier"
        );
    }
    FileOutcome::Indexed(kind, upsert)
}

/// Walk one root to completion. Walk errors are logged and skipped.
pub fn scan_root(store: &CatalogStore, lister: &dyn FileLister, root: &Path) -> RootScanReport {
    info!("Scanning directory: {}", root.display());
    let mut report = RootScanReport::new(root);

    for item in lister.list(root) {
        match item {
            Ok(record) => {
                let outcome = index_file(store, record);
                report.record(&outcome);
            }
            Err(e) => {
                warn!(root = %root.display(), error = %e, "Error walking directory");
                report.walk_errors += 1;
            }
        }
    }

    info!(
        root = %root.display(),
        videos = report.videos,
        images = report.images,
        unmatched = report.unmatched,
        duplicates = report.duplicates,
        walk_errors = report.walk_errors,
        "Directory scan complete"
    );
    report
}

/// Scan all `roots` in parallel, one blocking worker per root, and wait for
/// every worker before returning.
pub async fn build_catalog(
    store: Arc<CatalogStore>,
    lister: Arc<dyn FileLister>,
    roots: Vec<PathBuf>,
) -> ScanSummary {
    let mut workers = JoinSet::new();
    for root in roots {
        let store = store.clone();
        let lister = lister.clone();
        workers.spawn_blocking(move || scan_root(&store, lister.as_ref(), &root));
    }

    let mut summary = ScanSummary::default();
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(report) => summary.roots.push(report),
            Err(e) => {
                error!(error = %e, "Scan worker failed");
                summary.failed_workers += 1;
            }
        }
    }
    summary.roots.sort_by(|a, b| a.root.cmp(&b.root));

    info!(
        roots = summary.roots.len(),
        entries = store.len(),
        complete = store.complete_count(),
        "Catalog build finished"
    );
    summary
}
