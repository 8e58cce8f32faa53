//! Unit conversion utilities.
//!
//! VB6 stores every position and size in twips (1/1440 inch). Consumers
//! usually want device pixels at the classic 96 DPI.

pub const TWIPS_PER_INCH: f64 = 1440.0;
pub const DEFAULT_DPI: f64 = 96.0;

/// Convert twips to pixels at 96 DPI, truncating toward zero.
///
/// # Examples
///
/// ```
/// use vb6form::common::unit::twips_to_pixels;
/// assert_eq!(twips_to_pixels(1440), 96);
/// assert_eq!(twips_to_pixels(720), 48);
/// ```
#[inline]
pub fn twips_to_pixels(twips: i32) -> i32 {
    twips_to_pixels_at(twips, DEFAULT_DPI)
}

/// Convert twips to pixels at an arbitrary DPI, truncating toward zero.
#[inline]
pub fn twips_to_pixels_at(twips: i32, dpi: f64) -> i32 {
    let inches = twips as f64 / TWIPS_PER_INCH;
    (inches * dpi) as i32
}
