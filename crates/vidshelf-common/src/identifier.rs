//! Filename to identifier normalization.
//!
//! A media filename such as `abc123pl.jpg` or `MNO-345.HD.avi` is reduced to a
//! canonical `SERIES-NUMBER` identifier through a fixed sequence of steps:
//!
//! 1. [`strip_extension`] removes the last dot-suffix.
//! 2. [`strip_pl_suffix`] removes a trailing `pl`.
//! 3. [`strip_quality_suffix`] removes a trailing `.fhd`/`.hd`/`-fhd`/`-hd`.
//! 4. [`extract_identifier`] matches `LETTERS[-]DIGITS` and formats the result.
//!
//! Every comparison is ASCII case-insensitive. [`normalize`] runs the whole
//! pipeline.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Series code of at least two letters, optional hyphen, then the number.
static IDENTIFIER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u)^([a-z]{2,})-?([0-9]+)$").expect("identifier regex should compile")
});

const PL_SUFFIX: &str = "pl";
const DOT_QUALITY_SUFFIXES: &[&str] = &[".fhd", ".hd"];
const DASH_QUALITY_SUFFIXES: &[&str] = &["-fhd", "-hd"];

/// Canonical media identifier, e.g. `ABC-123`.
///
/// Only produced by [`normalize`], [`extract_identifier`] or
/// [`Identifier::parse`], so the inner string is always in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Accept a string that is already canonical.
    ///
    /// Lowercase or hyphen-less forms are rejected: `abc-123` and `ABC123`
    /// normalize to `ABC-123` but are not themselves identifiers.
    pub fn parse(s: &str) -> Option<Self> {
        extract_identifier(s).filter(|id| id.0 == s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Remove `suffix` from the end of `s`, ignoring ASCII case.
fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    let tail = s.get(split..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &s[..split])
}

/// Strip the last dot-suffix of a filename.
///
/// Only the final extension is removed: `ABC-123.HD.mkv` becomes `ABC-123.HD`.
pub fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) => &file_name[..idx],
        None => file_name,
    }
}

/// Strip a trailing `pl` (any case).
pub fn strip_pl_suffix(stem: &str) -> &str {
    strip_suffix_ignore_case(stem, PL_SUFFIX).unwrap_or(stem)
}

/// Strip a trailing quality marker.
///
/// The dot form (`.fhd`, `.hd`) is tried first, then the hyphen form (`-fhd`,
/// `-hd`). Each form is removed at most once.
pub fn strip_quality_suffix(stem: &str) -> &str {
    let stem = DOT_QUALITY_SUFFIXES
        .iter()
        .find_map(|suffix| strip_suffix_ignore_case(stem, suffix))
        .unwrap_or(stem);
    DASH_QUALITY_SUFFIXES
        .iter()
        .find_map(|suffix| strip_suffix_ignore_case(stem, suffix))
        .unwrap_or(stem)
}

/// Match a cleaned stem against the identifier pattern.
///
/// The letters are uppercased, the digits kept verbatim (leading zeros
/// included).
pub fn extract_identifier(stem: &str) -> Option<Identifier> {
    let caps = IDENTIFIER_PATTERN.captures(stem)?;
    let series = caps.get(1)?.as_str().to_ascii_uppercase();
    let number = caps.get(2)?.as_str();
    Some(Identifier(format!("{series}-{number}")))
}

/// Normalize a filename (extension included) into its identifier.
///
/// # Examples
///
/// ```
/// use vidshelf_common::identifier::normalize;
///
/// assert_eq!(normalize("GHI-789-HD.mp4").unwrap().as_str(), "GHI-789");
/// assert_eq!(normalize("pqr-678-fhd.wmv").unwrap().as_str(), "PQR-678");
/// assert!(normalize("a123.mp4").is_none());
/// ```
pub fn normalize(file_name: &str) -> Option<Identifier> {
    let stem = strip_extension(file_name);
    let stem = strip_pl_suffix(stem);
    let stem = strip_quality_suffix(stem);
    extract_identifier(stem)
}

/// Canonical filename for renaming: the identifier plus the original
/// extension, reattached verbatim.
///
/// # Examples
///
/// ```
/// use vidshelf_common::identifier::canonical_file_name;
///
/// assert_eq!(canonical_file_name("def456pl.JPG").as_deref(), Some("DEF-456.JPG"));
/// assert_eq!(canonical_file_name("notes.txt"), None);
/// ```
pub fn canonical_file_name(file_name: &str) -> Option<String> {
    let id = normalize(file_name)?;
    let ext = &file_name[strip_extension(file_name).len()..];
    Some(format!("{id}{ext}"))
}
