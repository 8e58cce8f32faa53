//! Font descriptors from `BeginProperty Font` blocks.

use super::types::PropertyMap;
use crate::common::encoding::{charset_to_codepage, codepage_to_encoding};
use encoding_rs::Encoding;
use serde::Serialize;

/// `Weight` value VB6 writes for bold text.
pub const FW_BOLD: i32 = 700;

/// A decoded `StdFont`.
///
/// Missing entries take their zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FontDescriptor {
    pub name: String,
    /// Point size
    pub size: f32,
    /// GDI character set
    pub charset: i32,
    pub weight: i32,
    /// `weight == 700`; intermediate weights count as regular
    pub bold: bool,
    pub underline: bool,
    pub italic: bool,
    pub strikethrough: bool,
}

impl FontDescriptor {
    /// Build a descriptor from the entries of a font block.
    pub fn from_properties(properties: &PropertyMap) -> Self {
        let weight = properties.int("Weight").unwrap_or_default();
        Self {
            name: properties.string("Name").unwrap_or_default(),
            size: properties.single("Size").unwrap_or_default(),
            charset: properties.int("Charset").unwrap_or_default(),
            weight,
            bold: weight == FW_BOLD,
            underline: properties.bool("Underline").unwrap_or_default(),
            italic: properties.bool("Italic").unwrap_or_default(),
            strikethrough: properties.bool("Strikethrough").unwrap_or_default(),
        }
    }

    /// Text encoding implied by the character set, if it has a fixed one.
    pub fn encoding(&self) -> Option<&'static Encoding> {
        charset_to_codepage(self.charset).and_then(codepage_to_encoding)
    }
}

impl PropertyMap {
    /// Font block stored under `key`.
    ///
    /// Present whenever the key exists, even if every entry is defaulted.
    pub fn font(&self, key: &str) -> Option<FontDescriptor> {
        self.get(key)
            .map(|property| FontDescriptor::from_properties(&property.properties))
    }
}
