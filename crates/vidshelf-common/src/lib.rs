//! vidshelf-common: shared filename handling for the vidshelf tools.
//!
//! This crate provides the pieces both the indexer and the renamer depend on:
//!
//! - **Identifier normalization**: reduce a media filename to its canonical
//!   `SERIES-NUMBER` identifier
//! - **Path utilities**: classify files as video, image or subtitle by extension
//!
//! # Examples
//!
//! ```
//! use std::path::Path;
//! use vidshelf_common::identifier::normalize;
//! use vidshelf_common::paths::{classify, MediaKind};
//!
//! let id = normalize("abc123pl.jpg").unwrap();
//! assert_eq!(id.as_str(), "ABC-123");
//!
//! assert_eq!(classify(Path::new("ABC-123.mkv")), Some(MediaKind::Video));
//! ```

pub mod identifier;
pub mod paths;

pub use identifier::{canonical_file_name, normalize, Identifier};
pub use paths::MediaKind;
