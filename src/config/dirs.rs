//! Root directory list.
//!
//! The list is a plain text file with one directory per line. Blank lines and
//! lines starting with `#` are ignored; `~` is expanded.

use std::path::{Path, PathBuf};

use super::LibraryConfig;
use crate::error::{Error, Result};

/// Parse the contents of a directory list file.
pub fn parse_directory_list(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(expand)
        .collect()
}

/// Read and parse a directory list file.
pub fn load_directory_list(path: &Path) -> Result<Vec<PathBuf>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read directory list {}: {e}",
            path.display()
        ))
    })?;
    Ok(parse_directory_list(&content))
}

/// Resolve the roots to scan.
///
/// Inline `directories` come first, then the entries of `dirs_file`. The file
/// must be readable unless inline directories are configured. Relative paths
/// are made absolute against `base` (itself taken relative to the working
/// directory when relative) and duplicates are dropped. An empty result is a
/// configuration error.
pub fn resolve_roots(library: &LibraryConfig, base: &Path) -> Result<Vec<PathBuf>> {
    let base = if base.is_absolute() {
        base.to_path_buf()
    } else {
        std::env::current_dir()?.join(base)
    };

    let mut roots: Vec<PathBuf> = library
        .directories
        .iter()
        .map(|p| expand(&p.to_string_lossy()))
        .collect();

    let dirs_file = absolutize(&expand(&library.dirs_file.to_string_lossy()), &base);
    if roots.is_empty() || dirs_file.exists() {
        roots.extend(load_directory_list(&dirs_file)?);
    }

    let mut resolved: Vec<PathBuf> = Vec::with_capacity(roots.len());
    for root in roots {
        let root = absolutize(&root, &base);
        if !resolved.contains(&root) {
            resolved.push(root);
        }
    }

    if resolved.is_empty() {
        return Err(Error::config(format!(
            "No directories configured in {}",
            dirs_file.display()
        )));
    }

    Ok(resolved)
}

fn expand(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
