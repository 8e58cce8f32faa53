//! Character encoding utilities for VB6 source files.
//!
//! The VB6 IDE saves forms and string-list resources in the ANSI codepage of
//! the machine that wrote them. This module maps Windows codepages (and the
//! GDI charset numbers stored in font descriptors) to `encoding_rs`
//! encodings and performs the conversion to UTF-8.

use encoding_rs::Encoding;
use std::borrow::Cow;

/// Codepage used when nothing better is known.
pub const DEFAULT_CODEPAGE: u32 = 1252;

/// Map Windows codepage identifier to encoding_rs Encoding.
///
/// # Examples
/// ```
/// use vb6form::common::encoding::codepage_to_encoding;
///
/// let encoding = codepage_to_encoding(936).unwrap();
/// assert_eq!(encoding.name(), "GBK");
/// ```
#[inline]
pub fn codepage_to_encoding(codepage: u32) -> Option<&'static Encoding> {
    match codepage {
        // DOS codepages
        866 => Some(encoding_rs::IBM866),

        // Macintosh
        10000 => Some(encoding_rs::MACINTOSH), // Macintosh Roman

        // Windows codepages (Western scripts)
        874 => Some(encoding_rs::WINDOWS_874),   // Thai
        1250 => Some(encoding_rs::WINDOWS_1250), // Central European
        1251 => Some(encoding_rs::WINDOWS_1251), // Cyrillic
        1252 => Some(encoding_rs::WINDOWS_1252), // Western European (most common, default ANSI)
        1253 => Some(encoding_rs::WINDOWS_1253), // Greek
        1254 => Some(encoding_rs::WINDOWS_1254), // Turkish
        1255 => Some(encoding_rs::WINDOWS_1255), // Hebrew
        1256 => Some(encoding_rs::WINDOWS_1256), // Arabic
        1257 => Some(encoding_rs::WINDOWS_1257), // Baltic
        1258 => Some(encoding_rs::WINDOWS_1258), // Vietnamese

        // East Asian codepages
        932 => Some(encoding_rs::SHIFT_JIS), // Japanese Shift-JIS
        936 => Some(encoding_rs::GBK),       // Simplified Chinese (GB2312/GBK)
        949 => Some(encoding_rs::EUC_KR),    // Korean
        950 => Some(encoding_rs::BIG5),      // Traditional Chinese (Big5)
        54936 => Some(encoding_rs::GB18030), // Chinese GB18030 (superset of GBK)

        // Unicode
        1200 => Some(encoding_rs::UTF_16LE),
        1201 => Some(encoding_rs::UTF_16BE),
        65001 => Some(encoding_rs::UTF_8),

        // Unsupported codepage
        _ => None,
    }
}

/// Resolve a codepage, falling back to Windows-1252 when it is unknown.
pub fn encoding_or_default(codepage: u32) -> &'static Encoding {
    codepage_to_encoding(codepage).unwrap_or_else(|| {
        log::warn!(
            "unsupported codepage {}, falling back to {}",
            codepage,
            DEFAULT_CODEPAGE
        );
        encoding_rs::WINDOWS_1252
    })
}

/// Map a GDI character set (the `Charset` entry of a VB6 font block) to the
/// Windows codepage it implies.
///
/// `DEFAULT_CHARSET` (1), `SYMBOL_CHARSET` (2) and `OEM_CHARSET` (255) have
/// no fixed codepage.
pub fn charset_to_codepage(charset: i32) -> Option<u32> {
    match charset {
        0 => Some(1252),   // ANSI_CHARSET
        77 => Some(10000), // MAC_CHARSET
        128 => Some(932),  // SHIFTJIS_CHARSET
        129 => Some(949),  // HANGUL_CHARSET
        134 => Some(936),  // GB2312_CHARSET
        136 => Some(950),  // CHINESEBIG5_CHARSET
        161 => Some(1253), // GREEK_CHARSET
        162 => Some(1254), // TURKISH_CHARSET
        163 => Some(1258), // VIETNAMESE_CHARSET
        177 => Some(1255), // HEBREW_CHARSET
        178 => Some(1256), // ARABIC_CHARSET
        186 => Some(1257), // BALTIC_CHARSET
        204 => Some(1251), // RUSSIAN_CHARSET
        222 => Some(874),  // THAI_CHARSET
        238 => Some(1250), // EASTEUROPE_CHARSET
        _ => None,
    }
}

/// Decode bytes as text.
///
/// Valid UTF-8 is borrowed as-is; anything else goes through `fallback`,
/// replacing undecodable sequences with U+FFFD.
pub fn decode_text<'a>(bytes: &'a [u8], fallback: &'static Encoding) -> Cow<'a, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (text, had_errors) = fallback.decode_without_bom_handling(bytes);
            if had_errors {
                log::warn!("text is not valid {}, lossy decoding applied", fallback.name());
            }
            text
        },
    }
}
