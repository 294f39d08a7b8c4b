use serde::Serialize;
use std::path::{Path, PathBuf};
use vidshelf_common::{Identifier, MediaKind};

/// URL prefix for video files.
pub const VIDEO_URL_PREFIX: &str = "/video";
/// URL prefix for poster images.
pub const POSTER_URL_PREFIX: &str = "/poster";

/// Known video and poster files for one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: Identifier,
    /// Display title. Set to the identifier when the entry is created.
    pub title: String,
    pub video_path: Option<PathBuf>,
    pub poster_path: Option<PathBuf>,
}

impl CatalogEntry {
    pub fn new(id: Identifier) -> Self {
        Self {
            title: id.to_string(),
            id,
            video_path: None,
            poster_path: None,
        }
    }

    /// Both the video and the poster are known.
    pub fn is_complete(&self) -> bool {
        self.video_path.is_some() && self.poster_path.is_some()
    }

    pub fn path(&self, kind: MediaKind) -> Option<&Path> {
        match kind {
            MediaKind::Video => self.video_path.as_deref(),
            MediaKind::Image => self.poster_path.as_deref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, kind: MediaKind) -> &mut Option<PathBuf> {
        match kind {
            MediaKind::Video => &mut self.video_path,
            MediaKind::Image => &mut self.poster_path,
        }
    }

    /// `/video/<id>` once a video is known.
    pub fn video_url(&self) -> Option<String> {
        self.video_path
            .as_ref()
            .map(|_| format!("{VIDEO_URL_PREFIX}/{}", self.id))
    }

    /// `/poster/<id>` once a poster is known.
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_ref()
            .map(|_| format!("{POSTER_URL_PREFIX}/{}", self.id))
    }

    /// Public view of the entry. Filesystem paths are never exposed.
    pub fn view(&self) -> EntryView {
        EntryView {
            id: self.id.clone(),
            title: self.title.clone(),
            video_path: self.video_url(),
            poster_path: self.poster_url(),
        }
    }
}

/// JSON shape returned by the query interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub id: Identifier,
    pub title: String,
    /// Derived URL, not the file path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_path: Option<String>,
    /// Derived URL, not the file path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
}

/// Result of a single upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// First file seen for this identifier.
    Created,
    /// The entry existed and the slot for this kind was empty.
    Updated,
    /// The same path was offered again.
    Unchanged,
    /// The slot was already taken by a different file.
    Duplicate(DuplicateFile),
}

/// Two files of the same kind claiming one identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct DuplicateFile {
    pub id: Identifier,
    pub kind: MediaKind,
    /// Path held by the catalog after the collision.
    pub kept: PathBuf,
    pub discarded: PathBuf,
}

/// Aggregate counts printed after a scan and served on `/api/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub entries: usize,
    pub videos: usize,
    pub posters: usize,
    /// Entries with both a video and a poster.
    pub complete: usize,
    pub videos_without_posters: Vec<Identifier>,
    pub posters_without_videos: Vec<Identifier>,
    pub unmatched: usize,
    pub duplicates: usize,
}
