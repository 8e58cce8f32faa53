//! The parsed form tree.

use crate::common::literal::unquote;
use crate::frx::{self, FrxResult, Locator, LocatorError};
use encoding_rs::Encoding;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where a form came from.
///
/// Shared by the form and every control in it so that a control can resolve
/// resource locators against the form's folder.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSource {
    path: PathBuf,
    folder: PathBuf,
    encoding: &'static Encoding,
}

impl FormSource {
    /// `folder` is made absolute against the current directory; the path does
    /// not need to exist.
    pub fn new(path: impl AsRef<Path>, encoding: &'static Encoding) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let absolute = std::path::absolute(&path)?;
        let folder = absolute
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(absolute);
        Ok(Self {
            path,
            folder,
            encoding,
        })
    }

    /// Path the form was loaded from, as given by the caller.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute folder containing the form and its `.frx` containers.
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Encoding used for ANSI text in the form and its containers.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

/// A named property value.
///
/// Leaf properties (`Caption = "OK"`) have a raw value and an empty nested
/// map. Block properties (`BeginProperty Font ... EndProperty`) have an empty
/// raw value and their entries in `properties`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    /// Raw text after `=`, trimmed, comment included
    pub value: String,
    /// Class id trailing a `BeginProperty` header, braces included
    pub class_id: Option<String>,
    pub properties: PropertyMap,
    /// Set for `BeginProperty` blocks, even empty ones
    block: bool,
}

impl Property {
    pub fn simple(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn block(name: impl Into<String>, class_id: Option<String>, properties: PropertyMap) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            class_id,
            properties,
            block: true,
        }
    }

    /// Whether this property came from a `BeginProperty` block.
    pub fn is_block(&self) -> bool {
        self.block
    }
}

/// Properties of one block, keyed by case-sensitive name.
///
/// Inserting an existing name replaces the earlier entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PropertyMap(BTreeMap<String, Property>);

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, returning the one it replaced.
    pub fn insert(&mut self, property: Property) -> Option<Property> {
        self.0.insert(property.name.clone(), property)
    }

    pub fn get(&self, key: &str) -> Option<&Property> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Values<'_, String, Property> {
        self.0.values()
    }
}

// Nested blocks are released from a heap worklist instead of recursively.
impl Drop for PropertyMap {
    fn drop(&mut self) {
        let mut pending: Vec<Property> = std::mem::take(&mut self.0).into_values().collect();
        while let Some(mut property) = pending.pop() {
            pending.extend(std::mem::take(&mut property.properties.0).into_values());
        }
    }
}

impl FromIterator<Property> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        let mut map = PropertyMap::new();
        for property in iter {
            map.insert(property);
        }
        map
    }
}

/// One `Begin <type> <name> ... End` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
    type_name: String,
    name: String,
    children: Vec<Control>,
    properties: PropertyMap,
    #[serde(skip)]
    source: Arc<FormSource>,
}

impl Control {
    pub(crate) fn new(
        type_name: impl Into<String>,
        name: impl Into<String>,
        children: Vec<Control>,
        properties: PropertyMap,
        source: Arc<FormSource>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            children,
            properties,
            source,
        }
    }

    /// Component kind, verbatim (`VB.CommandButton`, `MSComctlLib.ListView`).
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Child controls in declaration (z-) order.
    pub fn children(&self) -> &[Control] {
        &self.children
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// The form this control was declared in.
    pub fn source(&self) -> &FormSource {
        &self.source
    }

    /// All nested controls, depth first, in declaration order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Parse the locator stored in property `key`.
    ///
    /// `None` when the property is absent.
    pub fn locator(&self, key: &str) -> Option<Result<Locator, LocatorError>> {
        self.properties
            .raw(key)
            .map(|reference| Locator::parse(self.source.folder(), reference))
    }

    /// Read the binary record property `key` points at.
    pub fn binary_resource(&self, key: &str) -> FrxResult<Option<Vec<u8>>> {
        match self.locator(key) {
            None => Ok(None),
            Some(locator) => frx::read_binary(&locator?).map(Some),
        }
    }

    /// Read the string-list record property `key` points at.
    pub fn list_resource(&self, key: &str) -> FrxResult<Option<Vec<String>>> {
        match self.locator(key) {
            None => Ok(None),
            Some(locator) => frx::read_list(&locator?, self.source.encoding()).map(Some),
        }
    }
}

impl Drop for Control {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut control) = pending.pop() {
            pending.append(&mut control.children);
        }
    }
}

/// Depth-first iterator over nested controls.
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Control>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Control;

    fn next(&mut self) -> Option<Self::Item> {
        let control = self.stack.pop()?;
        self.stack.extend(control.children.iter().rev());
        Some(control)
    }
}

/// An `Attribute Name = Value` line following the root block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// An `Object = "{guid}#version#lcid"; "FILE.OCX"` header line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectReference {
    /// Type library reference, unquoted
    pub reference: String,
    /// Component file, when given
    pub file: Option<String>,
}

impl ObjectReference {
    /// Parse the text after `Object =`.
    pub fn parse(value: &str) -> Self {
        let (reference, file) = match value.split_once(';') {
            Some((reference, file)) => (reference, unquote(file)),
            None => (value, None),
        };
        Self {
            reference: unquote(reference).unwrap_or_else(|| reference.trim().to_string()),
            file,
        }
    }
}

/// A parsed `.frm` file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Form {
    #[serde(skip)]
    pub(crate) source: Arc<FormSource>,
    pub(crate) objects: Vec<ObjectReference>,
    pub(crate) root: Control,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) script: String,
}

impl Form {
    pub fn path(&self) -> &Path {
        self.source.path()
    }

    pub fn folder(&self) -> &Path {
        self.source.folder()
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.source.encoding()
    }

    /// `Object =` header lines, in file order.
    pub fn objects(&self) -> &[ObjectReference] {
        &self.objects
    }

    /// The top-level block, usually `VB.Form` or `VB.UserControl`.
    pub fn root(&self) -> &Control {
        &self.root
    }

    /// Trailing `Attribute` lines, in file order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Raw value of the first attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    /// The `VB_Name` attribute, unquoted.
    pub fn name(&self) -> Option<String> {
        self.attribute("VB_Name").and_then(unquote)
    }

    /// Code following the attributes, untouched.
    pub fn script(&self) -> &str {
        &self.script
    }

    /// The root followed by every nested control, depth first.
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        std::iter::once(&self.root).chain(self.root.descendants())
    }

    /// First control (root included) with the given name.
    ///
    /// Control arrays share a name; this returns the first element.
    pub fn find_control(&self, name: &str) -> Option<&Control> {
        self.controls().find(|control| control.name() == name)
    }
}
