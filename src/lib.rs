//! vb6form - A Rust library for parsing Visual Basic 6 form files
//!
//! This library reads the `.frm` text files VB6 saves for forms and user
//! controls, and the `.frx` binary containers that hold their pictures and
//! list contents.
//!
//! # Features
//!
//! - **Form parser**: Recursive `Begin`/`BeginProperty` block grammar into a control tree
//! - **Property decoding**: Strings, integers, booleans, colors, twips and fonts on demand
//! - **FRX reader**: Binary and string-list records addressed by locator
//! - **Codepages**: ANSI forms decoded through `encoding_rs`
//! - **Batch loading**: Independent forms loaded in parallel (`parallel` feature)
//!
//! # Example - Reading a form
//!
//! ```no_run
//! use vb6form::Form;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let form = Form::open("frmMain.frm")?;
//! println!("Form: {:?}", form.name());
//!
//! // Walk every control, root first
//! for control in form.controls() {
//!     let position = control.properties().vector2("Left", "Top");
//!     println!("{} {} at {:?}", control.type_name(), control.name(), position);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Reading resources
//!
//! ```no_run
//! use vb6form::{Form, ResourceCache, ResourceKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let form = Form::open("frmMain.frm")?;
//! let mut cache = ResourceCache::for_form(&form);
//!
//! if let Some(list) = form.find_control("lstItems") {
//!     if let Some(items) = cache.resolve(list, "List", ResourceKind::List)? {
//!         println!("Items: {:?}", items.as_list());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Shared helpers: literals, units, colors, codepages
pub mod common;

/// VB6 form (`.frm`) text parser
///
/// This module parses the form grammar into an immutable control tree and
/// decodes property values into typed values.
pub mod form;

/// FRX binary resource containers
///
/// This module resolves `"File.frx":offset` locators and reads the records
/// they point at.
pub mod frx;

// Re-export commonly used types for convenience
pub use common::{RGBColor, VbColor};
pub use form::{
    Attribute, Control, FontDescriptor, Form, FormError, FormResult, LoadOptions, ObjectReference,
    Property, PropertyMap, load_forms,
};
pub use frx::{FrxError, FrxResult, Locator, LocatorError, Resource, ResourceCache, ResourceKind};
