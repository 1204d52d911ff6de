//! Image reference parsing
//!
//! An [`ImageReference`] names one image variant as a `(repository, tag)`
//! pair. [`parse_image_list`] turns a pasted multi-line list into references,
//! skipping blank lines and `#` comments. No character-set validation happens
//! here: a malformed repository or tag is rejected by the registry when the
//! reference is checked.

use crate::error::{CheckerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tag assumed when a line carries no `:tag` suffix
pub const DEFAULT_TAG: &str = "latest";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageReference {
    pub repository: String,
    pub tag: String,
}

impl ImageReference {
    pub fn new(repository: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            tag: tag.into(),
        }
    }

    /// Parse a single input line, returning `None` for lines the list
    /// format ignores (blank lines and `#` comments).
    ///
    /// The line is split on the first `:`; everything before it is the
    /// repository, everything after is the tag.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        match line.split_once(':') {
            Some((repository, tag)) => Some(Self::new(repository, tag)),
            None => Some(Self::new(line, DEFAULT_TAG)),
        }
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)
    }
}

impl FromStr for ImageReference {
    type Err = CheckerError;

    fn from_str(s: &str) -> Result<Self> {
        ImageReference::parse_line(s).ok_or_else(|| {
            CheckerError::ImageParsing(format!("Not an image reference: '{}'", s.trim()))
        })
    }
}

/// Lazily yield the references contained in a raw multi-line image list.
///
/// The iterator borrows the input; calling the function again restarts the
/// walk from the top. Line order is preserved.
pub fn parse_image_list(text: &str) -> impl Iterator<Item = ImageReference> + '_ {
    text.lines().filter_map(ImageReference::parse_line)
}
