//! File listing sources for the scanner.
//!
//! The scanner never touches the filesystem directly; it consumes whatever a
//! [`FileLister`] yields for a root. [`WalkDirLister`] is the real recursive
//! walk, [`MemoryLister`] serves a fixed set of paths.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// A regular file found under a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub file_name: String,
}

impl FileRecord {
    pub fn from_path(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, file_name }
    }
}

/// Lazy sequence of files under one root.
pub type FileIter<'a> = Box<dyn Iterator<Item = Result<FileRecord>> + 'a>;

/// Source of files for a scan.
///
/// Implementations yield regular files only. A failure on one path is yielded
/// as an `Err` item and iteration continues.
pub trait FileLister: Send + Sync {
    fn list<'a>(&'a self, root: &Path) -> FileIter<'a>;
}

/// Recursive directory walk backed by `walkdir`.
#[derive(Debug, Clone)]
pub struct WalkDirLister {
    follow_links: bool,
}

impl WalkDirLister {
    pub fn new() -> Self {
        Self { follow_links: true }
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }
}

impl Default for WalkDirLister {
    fn default() -> Self {
        Self::new()
    }
}

impl FileLister for WalkDirLister {
    fn list<'a>(&'a self, root: &Path) -> FileIter<'a> {
        let walk = WalkDir::new(root)
            .follow_links(self.follow_links)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    Some(Ok(FileRecord::from_path(entry.into_path())))
                }
                Ok(_) => None,
                Err(err) => Some(Err(Error::from(err))),
            });
        Box::new(walk)
    }
}

/// Fixed listing keyed by root. Unknown roots yield a walk error.
#[derive(Debug, Clone, Default)]
pub struct MemoryLister {
    roots: BTreeMap<PathBuf, Vec<PathBuf>>,
}

impl MemoryLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `files` (full paths) under `root`.
    pub fn with_root<I, P>(mut self, root: impl Into<PathBuf>, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.roots
            .entry(root.into())
            .or_default()
            .extend(files.into_iter().map(Into::into));
        self
    }
}

impl FileLister for MemoryLister {
    fn list<'a>(&'a self, root: &Path) -> FileIter<'a> {
        match self.roots.get(root) {
            Some(files) => Box::new(
                files
                    .iter()
                    .map(|path| Ok(FileRecord::from_path(path.clone()))),
            ),
            None => Box::new(std::iter::once(Err(Error::Walk {
                path: Some(root.to_path_buf()),
                message: "root not found".into(),
            }))),
        }
    }
}
