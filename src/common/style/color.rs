use serde::Serialize;
use std::fmt;

/// Flag marking an OLE_COLOR value as a system color index.
pub const SYSTEM_COLOR_FLAG: u32 = 0x8000_0000;

/// RGB color representation.
///
/// Represents a color using red, green, and blue components, each in the range 0-255.
///
/// # Examples
///
/// ```rust
/// use vb6form::common::RGBColor;
///
/// // Create a red color
/// let red = RGBColor::new(255, 0, 0);
/// assert_eq!(red.to_string(), "#FF0000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RGBColor {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a 24-bit VB6 color value.
    ///
    /// The low byte is blue, then green, then red:
    /// `&H0000FF&` is pure blue, `&HFF0000&` is pure red.
    ///
    /// ```rust
    /// use vb6form::common::RGBColor;
    ///
    /// assert_eq!(RGBColor::from_vb_packed(0x0000FF), RGBColor::new(0, 0, 255));
    /// ```
    #[inline]
    pub const fn from_vb_packed(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    /// Convert to hex string (without # prefix).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vb6form::common::RGBColor;
    ///
    /// let color = RGBColor::new(255, 0, 0);
    /// assert_eq!(color.to_hex(), "FF0000");
    /// ```
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// A decoded VB6 `OLE_COLOR` literal.
///
/// Values with the high bit set refer to a Windows system color
/// (`&H8000000F&` is `vbButtonFace`) rather than a fixed RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VbColor {
    Rgb(RGBColor),
    /// Index into the `GetSysColor` table.
    System(u8),
}

impl VbColor {
    /// Interpret a raw 32-bit `OLE_COLOR`.
    pub const fn from_ole(value: u32) -> Self {
        if value & SYSTEM_COLOR_FLAG != 0 {
            VbColor::System((value & 0xFF) as u8)
        } else {
            VbColor::Rgb(RGBColor::from_vb_packed(value))
        }
    }

    /// The fixed RGB value, if this is not a system color.
    pub const fn rgb(&self) -> Option<RGBColor> {
        match self {
            VbColor::Rgb(color) => Some(*color),
            VbColor::System(_) => None,
        }
    }
}
