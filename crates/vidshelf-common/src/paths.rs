//! Path utilities for detecting file types by extension.
//!
//! The indexer only cares about videos and posters. The renamer also picks up
//! subtitle files so they follow their video when it is renamed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// List of supported video file extensions.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "wmv", "flv", "webm"];

/// List of supported image file extensions.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Subtitle extensions the renamer handles alongside videos.
const SUBTITLE_EXTENSIONS: &[&str] = &["srt"];

/// Kind of media file recognized by the indexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Image,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Video => f.write_str("video"),
            MediaKind::Image => f.write_str("image"),
        }
    }
}

/// Text after the last dot of the file name.
///
/// Unlike `Path::extension`, a name that is only a dot-suffix (`.mp4`) still
/// has an extension, so such files are classified and then reported as
/// unmatched instead of disappearing.
fn extension(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rfind('.').map(|idx| &name[idx + 1..])
}

fn extension_in(path: &Path, table: &[&str]) -> bool {
    extension(path)
        .map(|ext| table.iter().any(|known| known.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Classify a path by its extension.
///
/// Returns `None` for anything that is neither a video nor an image, including
/// subtitles.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use vidshelf_common::paths::{classify, MediaKind};
///
/// assert_eq!(classify(Path::new("/media/ABC-123.MKV")), Some(MediaKind::Video));
/// assert_eq!(classify(Path::new("ABC-123.webp")), Some(MediaKind::Image));
/// assert_eq!(classify(Path::new("ABC-123.srt")), None);
/// ```
pub fn classify(path: &Path) -> Option<MediaKind> {
    if is_video_file(path) {
        Some(MediaKind::Video)
    } else if is_image_file(path) {
        Some(MediaKind::Image)
    } else {
        None
    }
}

/// Check if a path has a video file extension.
pub fn is_video_file(path: &Path) -> bool {
    extension_in(path, VIDEO_EXTENSIONS)
}

/// Check if a path has an image file extension.
pub fn is_image_file(path: &Path) -> bool {
    extension_in(path, IMAGE_EXTENSIONS)
}

/// Check if a path has a subtitle file extension.
pub fn is_subtitle_file(path: &Path) -> bool {
    extension_in(path, SUBTITLE_EXTENSIONS)
}

/// Whether the renamer should consider this file.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use vidshelf_common::paths::is_renamable_file;
///
/// assert!(is_renamable_file(Path::new("abc123.srt")));
/// assert!(is_renamable_file(Path::new("abc123.jpeg")));
/// assert!(!is_renamable_file(Path::new("abc123.nfo")));
/// ```
pub fn is_renamable_file(path: &Path) -> bool {
    is_video_file(path) || is_image_file(path) || is_subtitle_file(path)
}
