//! vidshelf - local video library indexer
//!
//! Scans configured directories for video files and poster images, pairs
//! them by a normalized identifier parsed from the file name, and serves the
//! resulting catalog over HTTP. A standalone renamer applies the same
//! normalization to files on disk.
//!
//! This library crate exposes the core functionality for integration testing.

pub mod catalog;
pub mod config;
pub mod error;
pub mod rename;
pub mod scanner;
pub mod server;

pub use error::{Error, Result};
