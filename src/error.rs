//! Error type for the vidshelf library.
//!
//! Only [`Error::Config`] stops a run. Everything else is raised per file or per
//! subtree, reported, counted, and then processing continues with the
//! siblings. [`Error::http_status`] lets the server map failures to responses.

use std::fmt;
use std::path::PathBuf;

/// Failure modes across scanning, renaming and serving.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The directory list or server config could not be loaded.
    #[error("Config error: {0}")]
    Config(String),

    /// A path could not be read during a directory walk.
    #[error("Walk error at {path:?}: {message}")]
    Walk {
        /// Path that failed, when the walker knows it.
        path: Option<PathBuf>,
        message: String,
    },

    /// A filename does not fit the identifier pattern.
    #[error("No identifier in file name: {0}")]
    NoMatch(String),

    /// A rename target already exists.
    #[error("Target file already exists: {}", target.display())]
    Collision {
        source_path: PathBuf,
        target: PathBuf,
    },

    /// The filesystem rejected a rename.
    #[error("Failed to rename {} -> {}: {source}", from.display(), to.display())]
    RenameIo {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The requested entity could not be found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "video", "poster").
        entity: String,
        id: String,
    },

    /// Any other I/O failure.
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::NoMatch(_) => 400,
            Error::Collision { .. } => 409,
            Error::Config(_) | Error::Walk { .. } | Error::RenameIo { .. } | Error::Io { .. } => {
                500
            }
        }
    }

    /// Short machine-readable code for API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Config(_) => "config_error",
            Error::Walk { .. } => "walk_error",
            Error::NoMatch(_) => "no_match",
            Error::Collision { .. } => "collision",
            Error::RenameIo { .. } => "rename_error",
            Error::NotFound { .. } => "not_found",
            Error::Io { .. } => "io_error",
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::Config`].
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::Walk {
            path: err.path().map(|p| p.to_path_buf()),
            message: err.to_string(),
        }
    }
}
