//! VB6 literal helpers shared by the property decoder and the locator parser.

use memchr::{memchr, memchr2};

/// Cut a raw property value at the first apostrophe outside a string literal
/// and trim the rest.
///
/// ```
/// use vb6form::common::literal::strip_comment;
/// assert_eq!(strip_comment("-1  'True"), "-1");
/// assert_eq!(strip_comment("\"Don't\"  'Caption"), "\"Don't\"");
/// ```
pub fn strip_comment(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    let mut in_quotes = false;
    let mut pos = 0;
    while let Some(found) = memchr2(b'"', b'\'', &bytes[pos..]) {
        let at = pos + found;
        if bytes[at] == b'"' {
            in_quotes = !in_quotes;
        } else if !in_quotes {
            return raw[..at].trim();
        }
        pos = at + 1;
    }
    raw.trim()
}

/// Unescape a double-quoted VB string literal.
///
/// Embedded quotes are doubled (`"Say ""hi"""`). Text after the closing
/// quote may only be whitespace or an apostrophe comment. Returns `None`
/// when the input is not a complete literal.
///
/// ```
/// use vb6form::common::literal::unquote;
/// assert_eq!(unquote("\"Say \"\"hi\"\"\"").as_deref(), Some("Say \"hi\""));
/// assert_eq!(unquote("no quotes"), None);
/// ```
pub fn unquote(literal: &str) -> Option<String> {
    let body = literal.trim().strip_prefix('"')?;
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();
    while let Some((at, ch)) = chars.next() {
        if ch != '"' {
            out.push(ch);
            continue;
        }
        if matches!(chars.peek(), Some((_, '"'))) {
            chars.next();
            out.push('"');
            continue;
        }
        let rest = body[at + 1..].trim_start();
        return (rest.is_empty() || rest.starts_with('\'')).then_some(out);
    }
    None
}

/// Byte length of the double-quoted literal `text` starts with, quotes
/// included. `None` when `text` does not open with `"` or the literal is
/// never closed.
///
/// ```
/// use vb6form::common::literal::quoted_len;
/// assert_eq!(quoted_len("\"a:b\":0C"), Some(5));
/// assert_eq!(quoted_len("\"open"), None);
/// ```
pub fn quoted_len(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'"') {
        return None;
    }
    let mut pos = 1;
    while let Some(found) = memchr(b'"', &bytes[pos..]) {
        let at = pos + found;
        if bytes.get(at + 1) == Some(&b'"') {
            pos = at + 2;
        } else {
            return Some(at + 1);
        }
    }
    None
}
