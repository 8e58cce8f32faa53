//! Typed accessors over raw property values.
//!
//! Every accessor answers `None` when the key is missing or its value does
//! not have the requested shape; absence is never an error, callers apply
//! their own defaults.

use super::types::PropertyMap;
use crate::common::literal::{strip_comment, unquote};
use crate::common::style::{RGBColor, VbColor};
use crate::common::unit::twips_to_pixels;

impl PropertyMap {
    /// Raw value with any trailing `'comment` removed.
    ///
    /// Use [`PropertyMap::string`] for quoted text; apostrophes inside a
    /// literal are not comments, but callers that want the unescaped text
    /// should not go through this path.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.get(key).map(|property| strip_comment(&property.value))
    }

    /// Unescaped text of a double-quoted literal.
    pub fn string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|property| unquote(&property.value))
    }

    /// Base-10 signed integer.
    pub fn int(&self, key: &str) -> Option<i32> {
        self.raw(key)?.parse().ok()
    }

    /// VB6 boolean: `-1` is true, `0` is false, any other integer is absent.
    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.int(key)? {
            -1 => Some(true),
            0 => Some(false),
            _ => None,
        }
    }

    /// Single-precision number (`Size = 8.25`).
    pub fn single(&self, key: &str) -> Option<f32> {
        fast_float2::parse(self.raw(key)?).ok()
    }

    /// Raw `OLE_COLOR` value of a `&Hhhhhhhhh&` literal.
    pub fn ole_color(&self, key: &str) -> Option<u32> {
        let raw = self.raw(key)?;
        let hex = raw
            .strip_prefix("&H")
            .or_else(|| raw.strip_prefix("&h"))?;
        let hex = hex.strip_suffix('&').unwrap_or(hex);
        u32::from_str_radix(hex, 16).ok()
    }

    /// Color literal, distinguishing system colors from fixed RGB values.
    pub fn vb_color(&self, key: &str) -> Option<VbColor> {
        self.ole_color(key).map(VbColor::from_ole)
    }

    /// Fixed 24-bit color, unpacked from VB6's blue-green-red order.
    ///
    /// System colors are absent here; see [`PropertyMap::vb_color`].
    pub fn color(&self, key: &str) -> Option<RGBColor> {
        self.vb_color(key)?.rgb()
    }

    /// Twip measurement converted to 96 DPI pixels.
    pub fn twips(&self, key: &str) -> Option<i32> {
        self.int(key).map(twips_to_pixels)
    }

    /// Two twip measurements (`Left`/`Top`, `Width`/`Height`) as pixels.
    pub fn vector2(&self, x: &str, y: &str) -> Option<(i32, i32)> {
        Some((self.twips(x)?, self.twips(y)?))
    }
}
