//! Loading forms from disk or memory.

use super::error::{FormError, FormResult};
use super::options::LoadOptions;
use super::parser::parse_document;
use super::types::{Form, FormSource};
use crate::common::bom::{BomKind, strip_bom};
use crate::common::encoding::{decode_text, encoding_or_default};
use std::path::Path;
use std::sync::Arc;

/// The only form format version accepted.
pub const SUPPORTED_VERSION: &str = "5.00";

impl Form {
    /// Load a form with default options.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use vb6form::Form;
    ///
    /// let form = Form::open("Form1.frm")?;
    /// for control in form.controls() {
    ///     println!("{} {}", control.type_name(), control.name());
    /// }
    /// # Ok::<(), vb6form::FormError>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> FormResult<Self> {
        Self::open_with_options(path, &LoadOptions::default())
    }

    /// Load a form, decoding non-UTF-8 text with `options.codepage`.
    pub fn open_with_options(path: impl AsRef<Path>, options: &LoadOptions) -> FormResult<Self> {
        let path = path.as_ref();
        log::debug!("loading form {}", path.display());
        let bytes = std::fs::read(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => FormError::FileNotFound(path.to_path_buf()),
            _ => FormError::Io(err),
        })?;
        Self::from_bytes(path, &bytes, options)
    }

    /// Parse form bytes; `path` only locates sibling resource containers.
    pub fn from_bytes(path: impl AsRef<Path>, bytes: &[u8], options: &LoadOptions) -> FormResult<Self> {
        if bytes.is_empty() {
            return Err(FormError::EmptyFile);
        }
        let encoding = encoding_or_default(options.codepage);
        let (bom, body) = if options.strip_bom {
            strip_bom(bytes)
        } else {
            (None, bytes)
        };
        let text = match bom {
            Some(kind @ (BomKind::Utf16Le | BomKind::Utf16Be)) => {
                kind.encoding().decode_without_bom_handling(body).0
            }
            _ => decode_text(body, encoding),
        };
        let source = FormSource::new(path, encoding)?;
        parse_text(&text, Arc::new(source))
    }

    /// Parse form text that is already decoded.
    ///
    /// String-list resources of the form are decoded as Windows-1252.
    pub fn parse_str(path: impl AsRef<Path>, text: &str) -> FormResult<Self> {
        let encoding = encoding_or_default(LoadOptions::default().codepage);
        let source = FormSource::new(path, encoding)?;
        parse_text(text, Arc::new(source))
    }
}

fn parse_text(text: &str, source: Arc<FormSource>) -> FormResult<Form> {
    let lines: Vec<&str> = text.lines().collect();
    let (version_line, body) = lines.split_first().ok_or(FormError::EmptyFile)?;
    check_version(version_line)?;

    let form = parse_document(body, 2, source)?;
    log::debug!(
        "parsed form {}: {} controls, {} attributes",
        form.path().display(),
        form.controls().count(),
        form.attributes().len()
    );
    Ok(form)
}

fn check_version(line: &str) -> FormResult<()> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some("VERSION"), Some(SUPPORTED_VERSION), None) => Ok(()),
        _ => Err(FormError::UnsupportedVersion(line.trim().to_string())),
    }
}

/// Load several forms, in parallel when the `parallel` feature is enabled.
///
/// Results come back in input order; one failing form does not affect the
/// others.
pub fn load_forms<P>(paths: &[P], options: &LoadOptions) -> Vec<FormResult<Form>>
where
    P: AsRef<Path> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        paths
            .par_iter()
            .map(|path| Form::open_with_options(path, options))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        paths
            .iter()
            .map(|path| Form::open_with_options(path, options))
            .collect()
    }
}
