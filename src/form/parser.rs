//! Block grammar over the lines of a form.
//!
//! Parsing functions take a [`LineCursor`] by value and hand back the
//! advanced cursor with their result. Nested blocks are tracked on an
//! explicit stack, so nesting depth is bounded only by memory.

use super::error::{FormError, FormResult};
use super::types::{Attribute, Control, Form, FormSource, ObjectReference, Property, PropertyMap};
use memchr::memchr;
use std::sync::Arc;

const BEGIN: &str = "Begin ";
const END: &str = "End";
const BEGIN_PROPERTY: &str = "BeginProperty ";
const END_PROPERTY: &str = "EndProperty";
const ATTRIBUTE: &str = "Attribute ";
const OBJECT: &str = "Object";

/// Position within the physical lines of a form.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineCursor<'a> {
    lines: &'a [&'a str],
    pos: usize,
    /// 1-based line number of `lines[0]`
    first_line: usize,
}

impl<'a> LineCursor<'a> {
    pub(crate) fn new(lines: &'a [&'a str], first_line: usize) -> Self {
        Self {
            lines,
            pos: 0,
            first_line,
        }
    }

    /// Current line, trimmed.
    fn current(&self) -> Option<&'a str> {
        self.lines.get(self.pos).map(|line| line.trim())
    }

    fn advance(self) -> Self {
        Self {
            pos: self.pos + 1,
            ..self
        }
    }

    /// 1-based number of the current line.
    fn line_number(&self) -> usize {
        self.first_line + self.pos
    }

    fn skip_blank(mut self) -> Self {
        while self.current().is_some_and(str::is_empty) {
            self = self.advance();
        }
        self
    }

    /// Unconsumed lines, untrimmed.
    pub(crate) fn remaining(&self) -> &'a [&'a str] {
        self.lines.get(self.pos..).unwrap_or_default()
    }
}

/// Parse everything after the version line into a form.
pub(crate) fn parse_document(
    lines: &[&str],
    first_line: usize,
    source: Arc<FormSource>,
) -> FormResult<Form> {
    let cursor = LineCursor::new(lines, first_line);
    let (objects, cursor) = parse_object_references(cursor);
    let (root, cursor) = parse_control(cursor.skip_blank(), &source)?;
    let (attributes, cursor) = parse_attributes(cursor);
    let script = cursor.remaining().join("\n");

    Ok(Form {
        source,
        objects,
        root,
        attributes,
        script,
    })
}

/// Collect `Object = ...` header lines preceding the root block.
pub(crate) fn parse_object_references(
    mut cursor: LineCursor<'_>,
) -> (Vec<ObjectReference>, LineCursor<'_>) {
    let mut objects = Vec::new();
    loop {
        cursor = cursor.skip_blank();
        let Some(value) = cursor.current().and_then(object_value) else {
            return (objects, cursor);
        };
        objects.push(ObjectReference::parse(value));
        cursor = cursor.advance();
    }
}

fn object_value(line: &str) -> Option<&str> {
    line.strip_prefix(OBJECT)?.trim_start().strip_prefix('=')
}

/// Parse one `Begin <type> <name> ... End` block, children included.
pub(crate) fn parse_control<'a>(
    cursor: LineCursor<'a>,
    source: &Arc<FormSource>,
) -> FormResult<(Control, LineCursor<'a>)> {
    let opened_at = cursor.line_number();
    let header = cursor.current().ok_or_else(|| FormError::UnexpectedEndOfInput {
        line: opened_at,
        block: BEGIN.trim_end().to_string(),
    })?;
    let (type_name, name) = control_header(header, opened_at)?;
    log::trace!("line {opened_at}: control {type_name} {name}");

    let root = OpenBlock::new(BlockKind::Control { type_name, name }, header, opened_at);
    let (block, cursor) = parse_block(cursor.advance(), root, source)?;
    let control = Control::new(type_name, name, block.children, block.properties, Arc::clone(source));
    Ok((control, cursor))
}

#[derive(Debug, Clone, Copy)]
enum BlockKind<'a> {
    Control { type_name: &'a str, name: &'a str },
    Property { name: &'a str, class_id: Option<&'a str> },
}

/// A block whose closing line has not been seen yet.
#[derive(Debug)]
struct OpenBlock<'a> {
    kind: BlockKind<'a>,
    header: &'a str,
    opened_at: usize,
    children: Vec<Control>,
    properties: PropertyMap,
}

impl<'a> OpenBlock<'a> {
    fn new(kind: BlockKind<'a>, header: &'a str, opened_at: usize) -> Self {
        Self {
            kind,
            header,
            opened_at,
            children: Vec::new(),
            properties: PropertyMap::new(),
        }
    }

    fn closes_on(&self, line: &str) -> bool {
        match self.kind {
            BlockKind::Control { .. } => line == END,
            BlockKind::Property { .. } => line == END_PROPERTY,
        }
    }

    /// Reason `line` cannot appear directly inside this block.
    fn rejects(&self, line: &str) -> Option<String> {
        match self.kind {
            BlockKind::Control { .. } if line == END_PROPERTY => {
                Some("EndProperty outside a property block".to_string())
            }
            BlockKind::Property { name, .. } if line.starts_with(BEGIN) || line == END => {
                Some(format!("`{line}` inside property block {name}"))
            }
            _ => None,
        }
    }

    /// Attach a closed nested block to this one.
    fn adopt(&mut self, nested: OpenBlock<'a>, source: &Arc<FormSource>) {
        match nested.kind {
            BlockKind::Control { type_name, name } => self.children.push(Control::new(
                type_name,
                name,
                nested.children,
                nested.properties,
                Arc::clone(source),
            )),
            BlockKind::Property { name, class_id } => {
                let property = Property::block(name, class_id.map(str::to_string), nested.properties);
                insert_property(&mut self.properties, property, nested.opened_at);
            }
        }
    }
}

/// Fill `root` (whose header line is already consumed) up to its closing line.
///
/// Open ancestors live on a heap stack, so nesting depth is bounded only by
/// memory.
fn parse_block<'a>(
    mut cursor: LineCursor<'a>,
    root: OpenBlock<'a>,
    source: &Arc<FormSource>,
) -> FormResult<(OpenBlock<'a>, LineCursor<'a>)> {
    let mut current = root;
    let mut ancestors: Vec<OpenBlock<'a>> = Vec::new();
    loop {
        let line_no = cursor.line_number();
        let Some(line) = cursor.current() else {
            return Err(FormError::UnexpectedEndOfInput {
                line: current.opened_at,
                block: current.header.to_string(),
            });
        };

        if current.closes_on(line) {
            cursor = cursor.advance();
            let Some(parent) = ancestors.pop() else {
                return Ok((current, cursor));
            };
            let closed = std::mem::replace(&mut current, parent);
            current.adopt(closed, source);
        } else if let Some(reason) = current.rejects(line) {
            return Err(FormError::malformed(line_no, reason));
        } else if line.starts_with(BEGIN_PROPERTY) {
            let (name, class_id) = property_header(line, line_no)?;
            log::trace!("line {line_no}: property block {name}");
            let nested = OpenBlock::new(BlockKind::Property { name, class_id }, line, line_no);
            ancestors.push(std::mem::replace(&mut current, nested));
            cursor = cursor.advance();
        } else if line.starts_with(BEGIN) {
            let (type_name, name) = control_header(line, line_no)?;
            log::trace!("line {line_no}: control {type_name} {name}");
            let nested = OpenBlock::new(BlockKind::Control { type_name, name }, line, line_no);
            ancestors.push(std::mem::replace(&mut current, nested));
            cursor = cursor.advance();
        } else if line.is_empty() {
            cursor = cursor.advance();
        } else {
            insert_property(&mut current.properties, simple_property(line, line_no)?, line_no);
            cursor = cursor.advance();
        }
    }
}

/// Collect the `Attribute` lines directly following the root block.
///
/// The run ends at the first line that is not an attribute.
pub(crate) fn parse_attributes(mut cursor: LineCursor<'_>) -> (Vec<Attribute>, LineCursor<'_>) {
    let mut attributes = Vec::new();
    while let Some(rest) = cursor.current().and_then(|line| line.strip_prefix(ATTRIBUTE)) {
        match split_assignment(rest) {
            Some((name, value)) if !name.is_empty() => attributes.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            }),
            _ => log::warn!(
                "line {}: skipping attribute without a name and value: {rest:?}",
                cursor.line_number()
            ),
        }
        cursor = cursor.advance();
    }
    (attributes, cursor)
}

fn control_header(line: &str, line_no: usize) -> FormResult<(&str, &str)> {
    let rest = line
        .strip_prefix(BEGIN)
        .ok_or(FormError::ExpectedBegin { line: line_no })?;
    let mut tokens = rest.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(type_name), Some(name)) => Ok((type_name, name)),
        _ => Err(FormError::malformed(line_no, "Begin needs a type name and a control name")),
    }
}

fn property_header(line: &str, line_no: usize) -> FormResult<(&str, Option<&str>)> {
    let rest = line
        .strip_prefix(BEGIN_PROPERTY)
        .ok_or(FormError::ExpectedBeginProperty { line: line_no })?
        .trim();
    let (name, class_id) = match rest.split_once(char::is_whitespace) {
        Some((name, class_id)) => (name, Some(class_id.trim())),
        None => (rest, None),
    };
    if name.is_empty() {
        return Err(FormError::malformed(line_no, "BeginProperty needs a property name"));
    }
    Ok((name, class_id))
}

fn simple_property(line: &str, line_no: usize) -> FormResult<Property> {
    match split_assignment(line) {
        Some((name, value)) if !name.is_empty() => Ok(Property::simple(name, value)),
        Some(_) => Err(FormError::malformed(line_no, "property without a name")),
        None => Err(FormError::malformed(line_no, format!("expected `Name = Value`, got {line:?}"))),
    }
}

/// Split at the first `=`, trimming both sides.
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let eq = memchr(b'=', line.as_bytes())?;
    Some((line[..eq].trim(), line[eq + 1..].trim()))
}

fn insert_property(properties: &mut PropertyMap, property: Property, line_no: usize) {
    if let Some(previous) = properties.insert(property) {
        log::warn!(
            "line {line_no}: duplicate property {:?}, earlier value {:?} replaced",
            previous.name,
            previous.value
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> Arc<FormSource> {
        Arc::new(FormSource::new("Form1.frm", encoding_rs::UTF_8).unwrap())
    }

    /// Parse a body whose first line is numbered 2, as after the version line.
    fn parse(text: &str) -> FormResult<Form> {
        let lines: Vec<&str> = text.lines().collect();
        parse_document(&lines, 2, source())
    }

    #[test]
    fn test_single_control() {
        let form = parse("Begin VB.Form Form1\n   Caption = \"Hello\"\n   ClientWidth = 4680\nEnd\n")
            .unwrap();
        let root = form.root();
        assert_eq!(root.type_name(), "VB.Form");
        assert_eq!(root.name(), "Form1");
        assert_eq!(root.properties().len(), 2);
        assert_eq!(root.properties().string("Caption").as_deref(), Some("Hello"));
        assert!(root.children().is_empty());
        assert!(form.attributes().is_empty());
        assert!(form.script().is_empty());
    }

    #[test]
    fn test_children_keep_declaration_order() {
        let text = "\
Begin VB.Form Form1
   Begin VB.Frame Frame1
      Begin VB.OptionButton Option1
      End
      Begin VB.OptionButton Option2
      End
   End
   Begin VB.CommandButton Command1
   End
End";
        let form = parse(text).unwrap();
        let names: Vec<_> = form.root().children().iter().map(Control::name).collect();
        assert_eq!(names, ["Frame1", "Command1"]);
        let frame = &form.root().children()[0];
        let options: Vec<_> = frame.children().iter().map(Control::name).collect();
        assert_eq!(options, ["Option1", "Option2"]);
    }

    #[test]
    fn test_property_block_with_class_id() {
        let text = "\
Begin VB.Label Label1
   BeginProperty Font {0BE35203-8F91-11CE-9DE3-00AA004BB851}
      Name = \"Tahoma\"
      Size = 9.75
   EndProperty
   Caption = \"x\"
End";
        let form = parse(text).unwrap();
        let font = form.root().properties().get("Font").unwrap();
        assert!(font.is_block());
        assert_eq!(
            font.class_id.as_deref(),
            Some("{0BE35203-8F91-11CE-9DE3-00AA004BB851}")
        );
        assert_eq!(font.properties.len(), 2);
        assert_eq!(form.root().properties().len(), 2);
    }

    #[test]
    fn test_nested_property_blocks() {
        let text = "\
Begin MSComctlLib.StatusBar StatusBar1
   BeginProperty Panels {8E3867A5-8586-11D1-B16A-00C0F0283628}
      NumPanels = 2
      BeginProperty Panel1 {8E3867AB-8586-11D1-B16A-00C0F0283628}
         Text = \"Ready\"
      EndProperty
      BeginProperty Panel2 {8E3867AB-8586-11D1-B16A-00C0F0283628}
      EndProperty
   EndProperty
End";
        let form = parse(text).unwrap();
        let panels = form.root().properties().get("Panels").unwrap();
        assert_eq!(panels.properties.int("NumPanels"), Some(2));
        let panel1 = panels.properties.get("Panel1").unwrap();
        assert_eq!(panel1.properties.string("Text").as_deref(), Some("Ready"));
        assert!(panels.properties.get("Panel2").unwrap().is_block());
    }

    #[test]
    fn test_property_block_then_child_control() {
        let text = "\
Begin VB.Frame Frame1
   BeginProperty Font
      Weight = 700
   EndProperty
   Begin VB.Label Label1
      BeginProperty Font
         Weight = 400
      EndProperty
   End
End";
        let form = parse(text).unwrap();
        let root = form.root();
        assert_eq!(root.properties().font("Font").unwrap().weight, 700);
        assert_eq!(root.children()[0].properties().font("Font").unwrap().weight, 400);
    }

    #[test]
    fn test_duplicate_key_last_write_wins() {
        let form = parse("Begin VB.Form Form1\n   Caption = \"a\"\n   Caption = \"b\"\nEnd").unwrap();
        assert_eq!(form.root().properties().len(), 1);
        assert_eq!(form.root().properties().string("Caption").as_deref(), Some("b"));
    }

    #[test]
    fn test_blank_lines_inside_blocks_are_skipped() {
        let form = parse("Begin VB.Form Form1\n\n   Caption = \"a\"\n   \nEnd").unwrap();
        assert_eq!(form.root().properties().len(), 1);
    }

    #[test]
    fn test_value_keeps_text_after_first_equals() {
        let form = parse("Begin VB.Label Label1\n   Caption = \"a = b\"\nEnd").unwrap();
        assert_eq!(form.root().properties().string("Caption").as_deref(), Some("a = b"));
    }

    #[test]
    fn test_line_without_equals_is_malformed() {
        let err = parse("Begin VB.Form Form1\n   Caption \"a\"\nEnd").unwrap_err();
        assert!(matches!(err, FormError::MalformedStatement { line: 3, .. }), "{err:?}");
    }

    #[test]
    fn test_missing_property_name_is_malformed() {
        let err = parse("Begin VB.Form Form1\n   = 5\nEnd").unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_begin_without_name_is_malformed() {
        let err = parse("Begin VB.Form\nEnd").unwrap_err();
        assert!(matches!(err, FormError::MalformedStatement { line: 2, .. }), "{err:?}");
    }

    #[test]
    fn test_root_must_be_begin() {
        let err = parse("Caption = \"x\"\nEnd").unwrap_err();
        assert!(matches!(err, FormError::ExpectedBegin { line: 2 }), "{err:?}");
    }

    #[test]
    fn test_property_header_requires_keyword() {
        let err = property_header("Font = 1", 7).unwrap_err();
        assert!(matches!(err, FormError::ExpectedBeginProperty { line: 7 }), "{err:?}");
    }

    #[test]
    fn test_stray_end_property_is_malformed() {
        let err = parse("Begin VB.Form Form1\n   EndProperty\nEnd").unwrap_err();
        assert!(matches!(err, FormError::MalformedStatement { line: 3, .. }), "{err:?}");
    }

    #[test]
    fn test_control_inside_property_block_is_malformed() {
        let text = "Begin VB.Form Form1\n   BeginProperty Font\n      Begin VB.Label L\n      End\n   EndProperty\nEnd";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, FormError::MalformedStatement { line: 4, .. }), "{err:?}");
    }

    #[test]
    fn test_unterminated_property_block() {
        let text = "Begin VB.Form Form1\n   BeginProperty Font\n      Name = \"Arial\"\n";
        let err = parse(text).unwrap_err();
        match err {
            FormError::UnexpectedEndOfInput { line, block } => {
                assert_eq!(line, 3);
                assert_eq!(block, "BeginProperty Font");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_control() {
        let text = "Begin VB.Form Form1\n   Begin VB.Frame Frame1\n   End\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, FormError::UnexpectedEndOfInput { line: 2, .. }), "{err:?}");
    }

    #[test]
    fn test_empty_body() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, FormError::UnexpectedEndOfInput { line: 2, .. }), "{err:?}");
    }

    #[test]
    fn test_object_references() {
        let text = "\
Object = \"{831FDD16-0C5C-11D2-A9FC-0000F8754DA1}#2.0#0\"; \"MSCOMCTL.OCX\"
Object = \"{F9043C88-F6F2-101A-A3C9-08002B2F49FB}#1.2#0\"

Begin VB.Form Form1
End";
        let form = parse(text).unwrap();
        let objects = form.objects();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].reference, "{831FDD16-0C5C-11D2-A9FC-0000F8754DA1}#2.0#0");
        assert_eq!(objects[0].file.as_deref(), Some("MSCOMCTL.OCX"));
        assert_eq!(objects[1].file, None);
        assert_eq!(form.root().name(), "Form1");
    }

    #[test]
    fn test_attributes_and_script() {
        let text = "\
Begin VB.Form Form1
End
Attribute VB_Name = \"Form1\"
Attribute VB_Exposed
Attribute VB_Creatable = False
Option Explicit

Private Sub Form_Load()
End Sub";
        let form = parse(text).unwrap();
        let attributes = form.attributes();
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].name, "VB_Name");
        assert_eq!(attributes[0].value, "\"Form1\"");
        assert_eq!(attributes[1].name, "VB_Creatable");
        assert_eq!(attributes[1].value, "False");
        assert_eq!(form.name().as_deref(), Some("Form1"));
        assert_eq!(
            form.script(),
            "Option Explicit\n\nPrivate Sub Form_Load()\nEnd Sub"
        );
    }

    #[test]
    fn test_cursor_line_numbers() {
        let lines = ["a", "", "b"];
        let cursor = LineCursor::new(&lines, 2);
        assert_eq!(cursor.line_number(), 2);
        let cursor = cursor.advance().skip_blank();
        assert_eq!(cursor.line_number(), 4);
        assert_eq!(cursor.current(), Some("b"));
        assert_eq!(cursor.remaining(), ["b"]);
        let cursor = cursor.advance();
        assert_eq!(cursor.current(), None);
        assert!(cursor.remaining().is_empty());
    }
}
