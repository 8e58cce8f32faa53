//! Byte Order Mark (BOM) utilities.
//!
//! VB6 itself writes ANSI text without a BOM, but forms that went through a
//! modern editor often come back with one.

use encoding_rs::Encoding;

/// Supported BOM encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BomKind {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl BomKind {
    /// Returns the byte representation of the BOM.
    #[inline]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            BomKind::Utf8 => &UTF8_BOM,
            BomKind::Utf16Le => &UTF16_LE_BOM,
            BomKind::Utf16Be => &UTF16_BE_BOM,
        }
    }

    /// Returns the length in bytes of the BOM.
    #[inline]
    #[allow(clippy::len_without_is_empty)] // No need to check for empty BOMs
    pub const fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// The text encoding announced by this BOM.
    #[inline]
    pub fn encoding(&self) -> &'static Encoding {
        match self {
            BomKind::Utf8 => encoding_rs::UTF_8,
            BomKind::Utf16Le => encoding_rs::UTF_16LE,
            BomKind::Utf16Be => encoding_rs::UTF_16BE,
        }
    }
}

/// UTF-8 BOM bytes.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// UTF-16 little-endian BOM bytes.
pub const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
/// UTF-16 big-endian BOM bytes.
pub const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Detects a BOM at the start of `data`.
pub fn detect_bom(data: &[u8]) -> Option<BomKind> {
    if data.starts_with(&UTF8_BOM) {
        return Some(BomKind::Utf8);
    }
    if data.starts_with(&UTF16_LE_BOM) {
        return Some(BomKind::Utf16Le);
    }
    if data.starts_with(&UTF16_BE_BOM) {
        return Some(BomKind::Utf16Be);
    }
    None
}

/// Splits a leading BOM off `data`.
///
/// Returns the detected kind (if any) and the remaining bytes.
pub fn strip_bom(data: &[u8]) -> (Option<BomKind>, &[u8]) {
    match detect_bom(data) {
        Some(kind) => (Some(kind), &data[kind.len()..]),
        None => (None, data),
    }
}
