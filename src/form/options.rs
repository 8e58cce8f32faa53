/// Configuration options for loading forms.
///
/// # Examples
///
/// ```rust
/// use vb6form::LoadOptions;
///
/// // Create with defaults
/// let options = LoadOptions::default();
///
/// // Or customize for a form saved on a Cyrillic Windows install
/// let options = LoadOptions::new().with_codepage(1251).with_strip_bom(false);
/// ```
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// ANSI codepage of the form text and its string-list resources.
    /// Only consulted when the bytes are not valid UTF-8.
    pub codepage: u32,
    /// Whether to strip a leading byte order mark before the version check
    pub strip_bom: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            codepage: crate::common::encoding::DEFAULT_CODEPAGE,
            strip_bom: true,
        }
    }
}

impl LoadOptions {
    /// Create a new `LoadOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ANSI codepage.
    #[inline]
    pub fn with_codepage(mut self, codepage: u32) -> Self {
        self.codepage = codepage;
        self
    }

    /// Set whether to strip a leading byte order mark.
    #[inline]
    pub fn with_strip_bom(mut self, strip: bool) -> Self {
        self.strip_bom = strip;
        self
    }
}
