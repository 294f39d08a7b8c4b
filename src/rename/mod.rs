//! Standalone renamer.
//!
//! Renames media files in place to `<IDENTIFIER><original extension>`, using
//! the same normalization as the indexer. Existing files are never
//! overwritten, and a failure on one file or subdirectory does not stop the
//! others.

mod reporter;

pub use reporter::{ConsoleReporter, RenameReporter, SkipReason};

use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use vidshelf_common::{canonical_file_name, paths::is_renamable_file};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenameOptions {
    /// Report intended renames without touching the filesystem.
    pub dry_run: bool,
    /// Descend into subdirectories.
    pub recursive: bool,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            dry_run: true,
            recursive: false,
        }
    }
}

/// Running counters for one renamer run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenameStats {
    /// Files with a recognized extension.
    pub total: usize,
    /// Renamed, or would be renamed in dry-run mode.
    pub renamed: usize,
    pub skipped: usize,
    pub errors: usize,
}

pub struct Renamer<R> {
    options: RenameOptions,
    reporter: R,
    stats: RenameStats,
    /// Targets claimed by earlier previews; only filled in dry-run mode.
    planned: HashSet<PathBuf>,
}

impl<R: RenameReporter> Renamer<R> {
    pub fn new(options: RenameOptions, reporter: R) -> Self {
        Self {
            options,
            reporter,
            stats: RenameStats::default(),
            planned: HashSet::new(),
        }
    }

    /// Process `root`. Only a failure to read `root` itself is returned;
    /// everything below it is reported and counted.
    pub fn run(&mut self, root: &Path) -> Result<()> {
        tracing::debug!(root = %root.display(), options = ?self.options, "Starting rename run");
        self.process_dir(root)
    }

    pub fn stats(&self) -> RenameStats {
        self.stats
    }

    fn process_dir(&mut self, dir: &Path) -> Result<()> {
        let mut entries = fs::read_dir(dir)
            .and_then(|iter| iter.collect::<std::io::Result<Vec<_>>>())
            .map_err(|e| Error::Walk {
                path: Some(dir.to_path_buf()),
                message: format!("error reading directory: {e}"),
            })?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

            if is_dir {
                if self.options.recursive {
                    if let Err(e) = self.process_dir(&path) {
                        tracing::warn!(dir = %path.display(), error = %e, "Skipping subdirectory");
                        self.reporter.subdirectory_failed(&path, &e);
                    }
                }
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => self.process_file(dir, &name),
                Err(raw) => {
                    if is_renamable_file(Path::new(raw.to_string_lossy().as_ref())) {
                        tracing::warn!(
                            path = %path.display(),
                            "Skipping file name that is not valid UTF-8"
                        );
                        self.stats.total += 1;
                        self.stats.skipped += 1;
                        self.reporter.skipped(&path, SkipReason::InvalidName);
                    }
                }
            }
        }

        Ok(())
    }

    fn process_file(&mut self, dir: &Path, name: &str) {
        if !is_renamable_file(Path::new(name)) {
            return;
        }
        self.stats.total += 1;
        let from = dir.join(name);

        let new_name = match canonical_file_name(name).ok_or_else(|| Error::NoMatch(name.into()))
        {
            Ok(new_name) => new_name,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping file");
                self.stats.skipped += 1;
                self.reporter.skipped(&from, SkipReason::NoMatch);
                return;
            }
        };

        if new_name == name {
            self.stats.skipped += 1;
            self.reporter.skipped(&from, SkipReason::AlreadyCanonical);
            return;
        }

        let to = dir.join(&new_name);
        if fs::symlink_metadata(&to).is_ok() || self.planned.contains(&to) {
            self.stats.errors += 1;
            self.reporter.failed(&Error::Collision {
                source_path: from,
                target: to,
            });
            return;
        }

        self.reporter.planned(&from, &to);

        if self.options.dry_run {
            self.planned.insert(to.clone());
            self.stats.renamed += 1;
            self.reporter.renamed(&from, &to, true);
            return;
        }

        match fs::rename(&from, &to) {
            Ok(()) => {
                self.stats.renamed += 1;
                self.reporter.renamed(&from, &to, false);
            }
            Err(source) => {
                self.stats.errors += 1;
                self.reporter.failed(&Error::RenameIo {
                    from,
                    to,
                    source,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    fn file_name(path: &Path) -> String {
        path.file_name().unwrap().to_string_lossy().into_owned()
    }

    impl RenameReporter for Recorder {
        fn skipped(&mut self, path: &Path, reason: SkipReason) {
            self.events.push(format!("skip {} {:?}", file_name(path), reason));
        }
        fn planned(&mut self, _from: &Path, _to: &Path) {}
        fn renamed(&mut self, from: &Path, to: &Path, dry_run: bool) {
            let verb = if dry_run { "preview" } else { "renamed" };
            self.events
                .push(format!("{verb} {} {}", file_name(from), file_name(to)));
        }
        fn failed(&mut self, error: &Error) {
            self.events.push(format!("error {}", error.code()));
        }
        fn subdirectory_failed(&mut self, dir: &Path, _error: &Error) {
            self.events.push(format!("subdir {}", file_name(dir)));
        }
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn live() -> RenameOptions {
        RenameOptions {
            dry_run: false,
            recursive: false,
        }
    }

    #[test]
    fn dry_run_leaves_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "abc123pl.jpg");
        touch(dir.path(), "GHI-789-HD.mp4");

        let mut renamer = Renamer::new(RenameOptions::default(), Recorder::default());
        renamer.run(dir.path()).unwrap();

        assert_eq!(names(dir.path()), vec!["GHI-789-HD.mp4", "abc123pl.jpg"]);
        assert_eq!(
            renamer.stats(),
            RenameStats {
                total: 2,
                renamed: 2,
                skipped: 0,
                errors: 0
            }
        );
        assert_eq!(
            renamer.reporter.events,
            vec![
                "preview GHI-789-HD.mp4 GHI-789.mp4",
                "preview abc123pl.jpg ABC-123.jpg"
            ]
        );
    }

    #[test]
    fn live_run_renames_and_skips() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "mno-345.HD.avi");
        touch(dir.path(), "ABC-1.mkv");
        touch(dir.path(), "trailer.mp4");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "abc1.srt");

        let mut renamer = Renamer::new(live(), Recorder::default());
        renamer.run(dir.path()).unwrap();

        assert_eq!(
            names(dir.path()),
            vec!["ABC-1.mkv", "ABC-1.srt", "MNO-345.avi", "notes.txt", "trailer.mp4"]
        );
        assert_eq!(
            renamer.stats(),
            RenameStats {
                total: 4,
                renamed: 2,
                skipped: 2,
                errors: 0
            }
        );
    }

    #[test]
    fn collision_is_error_and_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        // Both normalize to ABC-123.mp4; entries are processed in name order.
        touch(dir.path(), "abc-123.mp4");
        touch(dir.path(), "abc123pl.mp4");

        let mut renamer = Renamer::new(live(), Recorder::default());
        renamer.run(dir.path()).unwrap();

        assert_eq!(names(dir.path()), vec!["ABC-123.mp4", "abc123pl.mp4"]);
        assert_eq!(renamer.stats().renamed, 1);
        assert_eq!(renamer.stats().errors, 1);
        assert_eq!(
            renamer.reporter.events,
            vec!["renamed abc-123.mp4 ABC-123.mp4", "error collision"]
        );
    }

    #[test]
    fn dry_run_reports_collision_like_live_run() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "abc-123.mp4");
        touch(dir.path(), "abc123pl.mp4");

        let mut renamer = Renamer::new(RenameOptions::default(), Recorder::default());
        renamer.run(dir.path()).unwrap();

        assert_eq!(names(dir.path()), vec!["abc-123.mp4", "abc123pl.mp4"]);
        assert_eq!(
            renamer.stats(),
            RenameStats {
                total: 2,
                renamed: 1,
                skipped: 0,
                errors: 1
            }
        );
        assert_eq!(
            renamer.reporter.events,
            vec!["preview abc-123.mp4 ABC-123.mp4", "error collision"]
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_name_is_counted_as_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let raw = OsStr::from_bytes(b"abc\xff1.mp4");
        fs::write(dir.path().join(raw), b"x").unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"notes\xff.txt")), b"x").unwrap();

        let mut renamer = Renamer::new(live(), Recorder::default());
        renamer.run(dir.path()).unwrap();

        assert_eq!(
            renamer.stats(),
            RenameStats {
                total: 1,
                renamed: 0,
                skipped: 1,
                errors: 0
            }
        );
        assert_eq!(renamer.reporter.events.len(), 1);
        assert!(renamer.reporter.events[0].ends_with("InvalidName"));
    }

    #[test]
    fn recursion_is_opt_in() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        touch(&dir.path().join("sub"), "xyz9.mp4");

        let mut flat = Renamer::new(live(), Recorder::default());
        flat.run(dir.path()).unwrap();
        assert_eq!(flat.stats().total, 0);
        assert_eq!(names(&dir.path().join("sub")), vec!["xyz9.mp4"]);

        let mut deep = Renamer::new(
            RenameOptions {
                dry_run: false,
                recursive: true,
            },
            Recorder::default(),
        );
        deep.run(dir.path()).unwrap();
        assert_eq!(deep.stats().renamed, 1);
        assert_eq!(names(&dir.path().join("sub")), vec!["XYZ-9.mp4"]);
    }

    #[test]
    fn missing_root_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let mut renamer = Renamer::new(live(), Recorder::default());
        let err = renamer.run(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, Error::Walk { .. }));
        assert_eq!(renamer.stats(), RenameStats::default());
    }

    #[test]
    fn skip_reasons() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "ABC-1.mp4");
        touch(dir.path(), "x1.mp4");

        let mut renamer = Renamer::new(live(), Recorder::default());
        renamer.run(dir.path()).unwrap();
        assert_eq!(
            renamer.reporter.events,
            vec!["skip ABC-1.mp4 AlreadyCanonical", "skip x1.mp4 NoMatch"]
        );
        assert_eq!(renamer.stats().skipped, 2);
    }
}
