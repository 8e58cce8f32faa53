//! Error types for FRX resource resolution.

use thiserror::Error;

/// Result type for FRX operations.
pub type FrxResult<T> = Result<T, FrxError>;

/// A `"file":offset` reference string that cannot be resolved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// No `:` between the filename and the offset
    #[error("malformed locator: missing colon")]
    MissingColon,

    /// The filename segment is not a double-quoted literal
    #[error("malformed locator: filename is not quoted: {0}")]
    UnquotedFilename(String),

    /// The filename unquotes to an empty string
    #[error("malformed locator: missing filename")]
    MissingFilename,

    /// The offset segment is not a non-negative 32-bit hex number
    #[error("malformed locator: invalid offset: {0}")]
    InvalidOffset(String),
}

/// FRX resource errors.
///
/// `Locator` means the reference text itself is broken; `Io` means the
/// reference was fine but the container is missing, truncated or corrupt.
#[derive(Error, Debug)]
pub enum FrxError {
    #[error(transparent)]
    Locator(#[from] LocatorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FrxError {
    /// Whether the failure came from the container rather than the reference.
    pub fn is_io(&self) -> bool {
        matches!(self, FrxError::Io(_))
    }
}
