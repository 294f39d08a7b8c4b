//! Per-file reporting for the renamer.

use std::path::Path;

use crate::error::Error;

/// Why a file was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The name has no identifier.
    NoMatch,
    /// The name is already canonical.
    AlreadyCanonical,
    /// The name is not valid UTF-8 and cannot be normalized.
    InvalidName,
}

/// Receives one call per decision the renamer makes.
pub trait RenameReporter {
    fn skipped(&mut self, path: &Path, reason: SkipReason);

    /// A rename target was computed and is free.
    fn planned(&mut self, from: &Path, to: &Path);

    /// The rename happened, or would have in dry-run mode.
    fn renamed(&mut self, from: &Path, to: &Path, dry_run: bool);

    /// Collision or rename failure for a single file.
    fn failed(&mut self, error: &Error);

    /// A subdirectory could not be read; its subtree is skipped.
    fn subdirectory_failed(&mut self, dir: &Path, error: &Error);
}

/// Console output for the `rename` command.
///
/// Terse mode keeps only the lines that describe renames and errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    terse: bool,
}

impl ConsoleReporter {
    pub fn new(terse: bool) -> Self {
        Self { terse }
    }
}

fn name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl RenameReporter for ConsoleReporter {
    fn skipped(&mut self, path: &Path, reason: SkipReason) {
        if self.terse {
            return;
        }
        match reason {
            SkipReason::NoMatch => println!("SKIP: {} (no match found)", name(path)),
            SkipReason::AlreadyCanonical => {
                println!("SKIP: {} (already in correct format)", name(path))
            }
            SkipReason::InvalidName => {
                println!("SKIP: {} (file name is not valid UTF-8)", name(path))
            }
        }
    }

    fn planned(&mut self, from: &Path, to: &Path) {
        if !self.terse {
            println!("Found: {}  -> {}", name(from), name(to));
        }
    }

    fn renamed(&mut self, from: &Path, to: &Path, dry_run: bool) {
        if dry_run {
            println!("PREVIEW: Would rename {} -> {}", name(from), name(to));
        } else {
            println!("RENAMED: {} -> {}", name(from), name(to));
        }
    }

    fn failed(&mut self, error: &Error) {
        println!("ERROR: {error}");
    }

    fn subdirectory_failed(&mut self, dir: &Path, error: &Error) {
        if !self.terse {
            println!("Error processing subdirectory {}: {error}", dir.display());
        }
    }
}
