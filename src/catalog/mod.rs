//! In-memory media catalog.
//!
//! [`CatalogStore`] owns the identifier -> entry map and the list of files
//! whose names could not be normalized. It is built once per process, filled
//! by the scanner workers, and then shared read-only with the HTTP layer.

mod types;

pub use types::*;

use parking_lot::{Mutex, RwLock};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use vidshelf_common::{Identifier, MediaKind};

use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub struct CatalogStore {
    entries: RwLock<HashMap<Identifier, CatalogEntry>>,
    unmatched: Mutex<Vec<PathBuf>>,
    duplicates: Mutex<Vec<DuplicateFile>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `path` to the entry for `id`, creating the entry if needed.
    ///
    /// The whole read-check-create-or-update sequence runs under one write
    /// lock. When the slot for `kind` is already held by another file, the
    /// lexicographically smaller path is kept, so the result does not depend
    /// on the order in which workers reach the store.
    pub fn upsert(&self, id: Identifier, kind: MediaKind, path: PathBuf) -> UpsertOutcome {
        let mut entries = self.entries.write();

        let (created, entry) = match entries.entry(id) {
            Entry::Occupied(occupied) => (false, occupied.into_mut()),
            Entry::Vacant(vacant) => {
                let entry = CatalogEntry::new(vacant.key().clone());
                (true, vacant.insert(entry))
            }
        };

        let entry_id = entry.id.clone();
        let slot = entry.slot_mut(kind);
        let duplicate = match slot {
            None => {
                *slot = Some(path);
                return if created {
                    UpsertOutcome::Created
                } else {
                    UpsertOutcome::Updated
                };
            }
            Some(existing) if *existing == path => return UpsertOutcome::Unchanged,
            Some(existing) => {
                let discarded = if path < *existing {
                    std::mem::replace(existing, path)
                } else {
                    path
                };
                DuplicateFile {
                    id: entry_id,
                    kind,
                    kept: existing.clone(),
                    discarded,
                }
            }
        };
        drop(entries);

        self.duplicates.lock().push(duplicate.clone());
        UpsertOutcome::Duplicate(duplicate)
    }

    /// Remember a media file whose name has no identifier.
    pub fn record_unmatched(&self, path: PathBuf) {
        self.unmatched.lock().push(path);
    }

    /// Unmatched files, sorted by path.
    pub fn unmatched_sorted(&self) -> Vec<PathBuf> {
        let mut paths = self.unmatched.lock().clone();
        paths.sort();
        paths
    }

    /// Same-kind collisions seen so far, sorted.
    pub fn duplicates(&self) -> Vec<DuplicateFile> {
        let mut dups = self.duplicates.lock().clone();
        dups.sort();
        dups
    }

    /// Complete entries whose title contains `filter` (case-insensitive),
    /// sorted by title.
    ///
    /// `None` and the empty string both match everything.
    pub fn search(&self, filter: Option<&str>) -> Vec<CatalogEntry> {
        let needle = filter
            .filter(|f| !f.is_empty())
            .map(|f| f.to_lowercase());

        let mut results: Vec<CatalogEntry> = self
            .entries
            .read()
            .values()
            .filter(|entry| entry.is_complete())
            .filter(|entry| match &needle {
                Some(needle) => entry.title.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .cloned()
            .collect();

        results.sort_by(|a, b| a.title.cmp(&b.title));
        results
    }

    /// Fetch a single entry by identifier.
    pub fn get(&self, id: &str) -> Option<CatalogEntry> {
        self.entries.read().get(id).cloned()
    }

    /// Absolute path of the file of `kind` for `id`.
    pub fn resolve(&self, id: &str, kind: MediaKind) -> Result<PathBuf> {
        let entries = self.entries.read();
        entries
            .get(id)
            .and_then(|entry| entry.path(kind))
            .map(Path::to_path_buf)
            .ok_or_else(|| match kind {
                MediaKind::Video => Error::not_found("video", id),
                MediaKind::Image => Error::not_found("poster", id),
            })
    }

    /// Video file to serve for `id`.
    pub fn resolve_video_path(&self, id: &str) -> Result<PathBuf> {
        self.resolve(id, MediaKind::Video)
    }

    /// Poster file to serve for `id`.
    pub fn resolve_poster_path(&self, id: &str) -> Result<PathBuf> {
        self.resolve(id, MediaKind::Image)
    }

    /// Number of entries with both a video and a poster.
    pub fn complete_count(&self) -> usize {
        self.entries
            .read()
            .values()
            .filter(|entry| entry.is_complete())
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Aggregate statistics over the current catalog.
    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats::default();
        {
            let entries = self.entries.read();
            stats.entries = entries.len();
            for entry in entries.values() {
                match (&entry.video_path, &entry.poster_path) {
                    (Some(_), Some(_)) => {
                        stats.videos += 1;
                        stats.posters += 1;
                        stats.complete += 1;
                    }
                    (Some(_), None) => {
                        stats.videos += 1;
                        stats.videos_without_posters.push(entry.id.clone());
                    }
                    (None, Some(_)) => {
                        stats.posters += 1;
                        stats.posters_without_videos.push(entry.id.clone());
                    }
                    (None, None) => {}
                }
            }
        }
        stats.videos_without_posters.sort();
        stats.posters_without_videos.sort();
        stats.unmatched = self.unmatched.lock().len();
        stats.duplicates = self.duplicates.lock().len();
        stats
    }
}
