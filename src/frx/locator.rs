//! `"file":offset` resource references.

use super::error::LocatorError;
use crate::common::literal::{quoted_len, unquote};
use std::path::{Path, PathBuf};

/// A resolved reference into an FRX container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    /// Container path, joined onto the owning form's folder
    pub path: PathBuf,
    /// Byte offset of the record inside the container
    pub offset: u64,
}

impl Locator {
    /// Parse a reference such as `"Form1.frx":0C81` relative to `folder`.
    ///
    /// The offset is hexadecimal without a `0x` prefix. The container is not
    /// touched; a missing file only shows up when a record is read.
    ///
    /// # Examples
    ///
    /// ```
    /// use vb6form::frx::Locator;
    ///
    /// let locator = Locator::parse("/forms", "\"Main.frx\":0C81").unwrap();
    /// assert_eq!(locator.offset, 0x0C81);
    /// assert!(locator.path.ends_with("Main.frx"));
    /// ```
    pub fn parse(folder: impl AsRef<Path>, reference: &str) -> Result<Self, LocatorError> {
        let reference = reference.trim();
        // Colons inside the quoted filename never separate.
        let filename_end = quoted_len(reference).unwrap_or(0);
        let colon = reference[filename_end..]
            .rfind(':')
            .map(|at| filename_end + at)
            .ok_or(LocatorError::MissingColon)?;
        let (quoted, offset) = (&reference[..colon], &reference[colon + 1..]);

        let filename = unquote(quoted)
            .ok_or_else(|| LocatorError::UnquotedFilename(quoted.to_string()))?;
        if filename.is_empty() {
            return Err(LocatorError::MissingFilename);
        }

        let offset = i32::from_str_radix(offset.trim(), 16)
            .ok()
            .and_then(|value| u64::try_from(value).ok())
            .ok_or_else(|| LocatorError::InvalidOffset(offset.to_string()))?;

        Ok(Self {
            path: folder.as_ref().join(filename),
            offset,
        })
    }
}
