//! Common types and utilities shared by the form and resource readers.

// Submodule declarations
pub mod bom;
pub mod encoding;
pub mod literal;
pub mod style;
pub mod unit;

// Re-exports for convenience
pub use bom::{BomKind, strip_bom};
pub use style::{RGBColor, VbColor};
