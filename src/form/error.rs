//! Error types for form loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for form operations.
pub type FormResult<T> = Result<T, FormError>;

/// Errors raised while loading a `.frm` file.
///
/// Grammar errors carry the 1-based physical line number; the `VERSION`
/// line is line 1.
#[derive(Error, Debug)]
pub enum FormError {
    /// The form file does not exist
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Zero-byte input
    #[error("file is empty")]
    EmptyFile,

    /// First line missing or not `VERSION 5.00`
    #[error("version is missing or not supported: {0:?}")]
    UnsupportedVersion(String),

    /// A control block was expected but the line does not start with `Begin`
    #[error("line {line}: expected Begin keyword")]
    ExpectedBegin { line: usize },

    /// A property block was expected but the line does not start with `BeginProperty`
    #[error("line {line}: expected BeginProperty keyword")]
    ExpectedBeginProperty { line: usize },

    /// A line that fits no statement of the grammar
    #[error("line {line}: malformed statement: {reason}")]
    MalformedStatement { line: usize, reason: String },

    /// Input ended inside a block, usually a truncated file
    #[error("unexpected end of input: `{block}` opened on line {line} is never closed")]
    UnexpectedEndOfInput { line: usize, block: String },
}

impl FormError {
    /// The source line the error refers to, for grammar errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            FormError::ExpectedBegin { line }
            | FormError::ExpectedBeginProperty { line }
            | FormError::MalformedStatement { line, .. }
            | FormError::UnexpectedEndOfInput { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        FormError::MalformedStatement {
            line,
            reason: reason.into(),
        }
    }
}
