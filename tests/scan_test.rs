//! Catalog builder integration tests.

mod common;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use vidshelf::catalog::CatalogStore;
use vidshelf::scanner::{build_catalog, scan_root, FileLister, MemoryLister, WalkDirLister};

fn snapshot(store: &CatalogStore) -> Vec<(String, Option<PathBuf>, Option<PathBuf>)> {
    let mut ids: Vec<String> = store
        .stats()
        .videos_without_posters
        .iter()
        .chain(store.stats().posters_without_videos.iter())
        .map(|id| id.to_string())
        .chain(store.search(None).into_iter().map(|e| e.id.to_string()))
        .collect();
    ids.sort();
    ids.into_iter()
        .map(|id| {
            let entry = store.get(&id).unwrap();
            (id, entry.video_path, entry.poster_path)
        })
        .collect()
}

/// Eight roots with disjoint and overlapping identifiers, including
/// same-kind duplicates spread across roots.
fn overlapping_lister() -> (MemoryLister, Vec<PathBuf>) {
    let mut lister = MemoryLister::new();
    let mut roots = Vec::new();
    for r in 0..8 {
        let root = format!("/lib{r}");
        let mut files = Vec::new();
        for n in 0..50 {
            // Every root repeats ids 0..10; 10.. are disjoint per root
            let id = if n < 10 { n } else { r * 100 + n };
            let ext = if (n + r) % 2 == 0 { "mp4" } else { "jpg" };
            files.push(format!("{root}/sub{}/ab{id}.{ext}", n % 3));
        }
        files.push(format!("{root}/unmatched{r}.mkv"));
        lister = lister.with_root(root.clone(), files);
        roots.push(PathBuf::from(root));
    }
    (lister, roots)
}

#[tokio::test]
async fn concurrent_build_matches_sequential() {
    let (lister, roots) = overlapping_lister();

    let sequential = CatalogStore::new();
    for root in &roots {
        scan_root(&sequential, &lister, root);
    }

    let lister: Arc<dyn FileLister> = Arc::new(lister);
    for _ in 0..5 {
        let concurrent = Arc::new(CatalogStore::new());
        let summary = build_catalog(concurrent.clone(), lister.clone(), roots.clone()).await;
        assert_eq!(summary.roots.len(), roots.len());
        assert_eq!(summary.failed_workers, 0);

        assert_eq!(snapshot(&concurrent), snapshot(&sequential));
        assert_eq!(concurrent.len(), sequential.len());
        assert_eq!(concurrent.complete_count(), sequential.complete_count());
        assert_eq!(concurrent.duplicates().len(), sequential.duplicates().len());
        assert_eq!(concurrent.unmatched_sorted(), sequential.unmatched_sorted());
    }
}

#[tokio::test]
async fn root_order_does_not_change_result() {
    let (lister, roots) = overlapping_lister();
    let lister: Arc<dyn FileLister> = Arc::new(lister);

    let forward = Arc::new(CatalogStore::new());
    build_catalog(forward.clone(), lister.clone(), roots.clone()).await;

    let mut reversed_roots = roots.clone();
    reversed_roots.reverse();
    let reversed = Arc::new(CatalogStore::new());
    build_catalog(reversed.clone(), lister, reversed_roots).await;

    assert_eq!(snapshot(&forward), snapshot(&reversed));
}

#[tokio::test]
async fn duplicate_keeps_smallest_path() {
    let lister: Arc<dyn FileLister> = Arc::new(
        MemoryLister::new()
            .with_root("/z", ["/z/ABC-1.mp4"])
            .with_root("/a", ["/a/abc1.mkv"]),
    );
    let store = Arc::new(CatalogStore::new());
    build_catalog(
        store.clone(),
        lister,
        vec![PathBuf::from("/z"), PathBuf::from("/a")],
    )
    .await;

    assert_eq!(
        store.get("ABC-1").unwrap().video_path,
        Some(PathBuf::from("/a/abc1.mkv"))
    );
    let dups = store.duplicates();
    assert_eq!(dups.len(), 1);
    assert_eq!(dups[0].kept, PathBuf::from("/a/abc1.mkv"));
    assert_eq!(dups[0].discarded, PathBuf::from("/z/ABC-1.mp4"));
}

#[tokio::test]
async fn completeness_invariant_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    common::write_library(dir.path());

    let store = Arc::new(CatalogStore::new());
    let summary = build_catalog(
        store.clone(),
        Arc::new(WalkDirLister::new()),
        common::library_roots(dir.path()),
    )
    .await;
    assert_eq!(summary.walk_errors(), 0);

    let complete = store.search(None);
    assert_eq!(complete.len(), store.complete_count());
    for entry in &complete {
        let video = entry.video_path.as_ref().unwrap();
        let poster = entry.poster_path.as_ref().unwrap();
        assert!(video.is_absolute() && video.is_file());
        assert!(poster.is_absolute() && poster.is_file());
    }

    assert_eq!(
        store.unmatched_sorted(),
        vec![dir.path().join("a").join("trailer.mp4")]
    );
}

#[tokio::test]
async fn missing_root_does_not_stop_others() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("XYZ-9.mp4"), b"v").unwrap();
    fs::write(dir.path().join("XYZ-9.jpg"), b"p").unwrap();

    let store = Arc::new(CatalogStore::new());
    let summary = build_catalog(
        store.clone(),
        Arc::new(WalkDirLister::new()),
        vec![dir.path().join("does-not-exist"), dir.path().to_path_buf()],
    )
    .await;

    assert_eq!(summary.roots.len(), 2);
    assert!(summary.walk_errors() >= 1);
    assert_eq!(store.complete_count(), 1);
}
