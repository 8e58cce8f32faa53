//! VB6 form (`.frm`) parser.
//!
//! A form file is line-oriented text: a `VERSION 5.00` header, optional
//! `Object =` references to ActiveX libraries, one root `Begin ... End`
//! block with nested controls and `BeginProperty` blocks, trailing
//! `Attribute` lines and finally the form's code, kept as opaque text.
//!
//! # Architecture
//!
//! - **Parser**: explicit line cursor over the recursive block grammar
//! - **Types**: the immutable control tree with raw property values
//! - **Property accessors**: typed decoding of raw values on demand
//!   (strings, integers, booleans, colors, twips, fonts)
//!
//! # Example
//!
//! ```rust,no_run
//! use vb6form::Form;
//!
//! let form = Form::open("Form1.frm")?;
//! let root = form.root();
//! let caption = root.properties().string("Caption");
//! let size = root.properties().vector2("ClientWidth", "ClientHeight");
//! if let Some(button) = form.find_control("cmdOK") {
//!     let font = button.properties().font("Font");
//! }
//! # Ok::<(), vb6form::FormError>(())
//! ```

mod error;
mod font;
mod loader;
mod options;
mod parser;
mod props;
mod types;


// Re-exports
pub use error::{FormError, FormResult};
pub use font::{FW_BOLD, FontDescriptor};
pub use loader::{SUPPORTED_VERSION, load_forms};
pub use options::LoadOptions;
pub use types::{
    Attribute, Control, Descendants, Form, FormSource, ObjectReference, Property, PropertyMap,
};
