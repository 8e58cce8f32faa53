//! Per-form cache of FRX container bytes.

use super::error::FrxResult;
use super::locator::Locator;
use super::reader::read_resource_from;
use super::resource::{Resource, ResourceKind};
use crate::form::{Control, Form};
use encoding_rs::Encoding;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Keeps each container's bytes in memory after its first use.
///
/// A form usually points dozens of locators at the same `.frx` file. The
/// cache reads the file once, closes it, and serves later records from
/// memory. Entries are keyed by absolute container path; create one cache
/// per form, since containers belong to the form that wrote them.
#[derive(Debug)]
pub struct ResourceCache {
    encoding: &'static Encoding,
    containers: HashMap<PathBuf, Vec<u8>>,
}

impl ResourceCache {
    /// Create an empty cache decoding list items with `encoding`.
    pub fn new(encoding: &'static Encoding) -> Self {
        Self {
            encoding,
            containers: HashMap::new(),
        }
    }

    /// Create an empty cache using the form's text encoding.
    pub fn for_form(form: &Form) -> Self {
        Self::new(form.encoding())
    }

    /// Read the record a locator points at.
    pub fn read(&mut self, locator: &Locator, kind: ResourceKind) -> FrxResult<Resource> {
        let encoding = self.encoding;
        let data = self.container(&locator.path)?;
        read_resource_from(&mut Cursor::new(data), locator.offset, kind, encoding)
    }

    /// Resolve a control property holding a locator.
    ///
    /// Returns `Ok(None)` when the control has no such property.
    pub fn resolve(
        &mut self,
        control: &Control,
        key: &str,
        kind: ResourceKind,
    ) -> FrxResult<Option<Resource>> {
        match control.locator(key) {
            None => Ok(None),
            Some(locator) => self.read(&locator?, kind).map(Some),
        }
    }

    /// Number of containers held in memory.
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Drop every cached container.
    pub fn clear(&mut self) {
        self.containers.clear();
    }

    fn container(&mut self, path: &Path) -> std::io::Result<&[u8]> {
        let data = match self.containers.entry(std::path::absolute(path)?) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                log::debug!("loading resource container {}", entry.key().display());
                let data = std::fs::read(entry.key())?;
                entry.insert(data)
            }
        };
        Ok(data.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    /// Blob `01 02` at 0x00, list `["ok"]` at 0x0E.
    fn container() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&[0; 8]);
        data.extend_from_slice(&2u32.to_le_bytes());
        data.extend_from_slice(&[1, 2]);
        data.extend_from_slice(&1u16.to_le_bytes());
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(b"ok");
        data
    }

    #[test]
    fn test_records_share_one_container() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Main.frx");
        fs::write(&path, container()).unwrap();

        let mut cache = ResourceCache::new(encoding_rs::WINDOWS_1252);
        let blob = Locator { path: path.clone(), offset: 0 };
        let list = Locator { path: path.clone(), offset: 0x0E };

        assert_eq!(
            cache.read(&blob, ResourceKind::Binary).unwrap(),
            Resource::Binary(vec![1, 2])
        );
        fs::remove_file(&path).unwrap();
        assert_eq!(
            cache.read(&list, ResourceKind::List).unwrap(),
            Resource::List(vec!["ok".to_string()])
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Late.frx");
        let locator = Locator { path: path.clone(), offset: 0 };

        let mut cache = ResourceCache::new(encoding_rs::WINDOWS_1252);
        assert!(cache.read(&locator, ResourceKind::Binary).unwrap_err().is_io());
        assert!(cache.is_empty());

        fs::write(&path, container()).unwrap();
        assert!(cache.read(&locator, ResourceKind::Binary).is_ok());
        assert_eq!(cache.len(), 1);
    }
}
