//! FRX binary resource containers.
//!
//! A VB6 form keeps property values that do not fit on a text line
//! (pictures, icons, list contents) in a companion `.frx` file. The form
//! text refers to them with locators such as `"Form1.frx":0C81`.
//!
//! # Example
//!
//! ```rust,no_run
//! use vb6form::frx::{self, Locator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let locator = Locator::parse("project", "\"Form1.frx\":0000")?;
//! let picture = frx::read_binary(&locator)?;
//! println!("{} bytes", picture.len());
//! # Ok(())
//! # }
//! ```

mod cache;
mod error;
mod locator;
mod reader;
mod resource;

// Re-exports
pub use cache::ResourceCache;
pub use error::{FrxError, FrxResult, LocatorError};
pub use locator::Locator;
pub use reader::{
    BINARY_HEADER_LEN, LIST_HEADER_LEN, read_binary, read_binary_record, read_list,
    read_list_record, read_resource, read_resource_from,
};
pub use resource::{Resource, ResourceKind};
