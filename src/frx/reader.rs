//! Record readers for FRX containers.
//!
//! An FRX file has no index: the form text points at each record by byte
//! offset. Two record layouts exist, both little-endian:
//!
//! - binary: `u32 reserved, u32 reserved, u32 size`, then `size` bytes
//! - list: `u16 count, u16 max_item_len`, then `count` x (`u16 len`, `len` bytes)

use super::error::FrxResult;
use super::locator::Locator;
use super::resource::{Resource, ResourceKind};
use crate::common::encoding::decode_text;
use encoding_rs::Encoding;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use zerocopy::{FromBytes, LE, U16, U32};
use zerocopy_derive::FromBytes as DeriveFromBytes;

/// Size of the binary record header in bytes.
pub const BINARY_HEADER_LEN: usize = 12;
/// Size of the list record header in bytes.
pub const LIST_HEADER_LEN: usize = 4;

/// Raw binary record header (12 bytes)
#[derive(Debug, Clone, DeriveFromBytes)]
#[repr(C)]
struct RawBinaryHeader {
    reserved1: U32<LE>,
    reserved2: U32<LE>,
    /// Number of payload bytes following the header
    size: U32<LE>,
}

/// Raw list record header (4 bytes)
#[derive(Debug, Clone, DeriveFromBytes)]
#[repr(C)]
struct RawListHeader {
    count: U16<LE>,
    /// Longest item, informational only
    max_item_len: U16<LE>,
}

/// Read a binary record from the container a locator points at.
pub fn read_binary(locator: &Locator) -> FrxResult<Vec<u8>> {
    log::debug!("reading binary record {}:{:#X}", locator.path.display(), locator.offset);
    let mut file = File::open(&locator.path)?;
    read_binary_record(&mut file, locator.offset)
}

/// Read a string-list record from the container a locator points at.
///
/// Item bytes are UTF-8 when valid, otherwise decoded with `encoding`.
pub fn read_list(locator: &Locator, encoding: &'static Encoding) -> FrxResult<Vec<String>> {
    log::debug!("reading list record {}:{:#X}", locator.path.display(), locator.offset);
    let mut file = File::open(&locator.path)?;
    read_list_record(&mut file, locator.offset, encoding)
}

/// Read either record shape from the container a locator points at.
pub fn read_resource(
    locator: &Locator,
    kind: ResourceKind,
    encoding: &'static Encoding,
) -> FrxResult<Resource> {
    let mut file = File::open(&locator.path)?;
    read_resource_from(&mut file, locator.offset, kind, encoding)
}

/// Read either record shape at `offset` of an open container.
pub fn read_resource_from<R: Read + Seek>(
    reader: &mut R,
    offset: u64,
    kind: ResourceKind,
    encoding: &'static Encoding,
) -> FrxResult<Resource> {
    match kind {
        ResourceKind::Binary => read_binary_record(reader, offset).map(Resource::Binary),
        ResourceKind::List => read_list_record(reader, offset, encoding).map(Resource::List),
    }
}

/// Read a binary record at `offset`.
///
/// A zero size yields an empty vector without touching the bytes that
/// follow. Fewer than `size` available bytes is an `UnexpectedEof` error;
/// partial payloads are never returned.
pub fn read_binary_record<R: Read + Seek>(reader: &mut R, offset: u64) -> FrxResult<Vec<u8>> {
    let available = seek_record(reader, offset)?;

    let mut raw = [0u8; BINARY_HEADER_LEN];
    reader.read_exact(&mut raw)?;
    let header = RawBinaryHeader::read_from_bytes(&raw)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "invalid binary record header"))?;

    let size = header.size.get();
    log::trace!(
        "binary record at {:#X}: reserved {:#X}/{:#X}, {} bytes",
        offset,
        header.reserved1.get(),
        header.reserved2.get(),
        size
    );
    if size == 0 {
        return Ok(Vec::new());
    }

    let payload_available = available.saturating_sub(BINARY_HEADER_LEN as u64);
    if u64::from(size) > payload_available {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "binary record at {:#X} declares {} bytes but only {} remain",
                offset, size, payload_available
            ),
        )
        .into());
    }

    let mut data = vec![0u8; size as usize];
    reader.read_exact(&mut data)?;
    Ok(data)
}

/// Read a string-list record at `offset`.
pub fn read_list_record<R: Read + Seek>(
    reader: &mut R,
    offset: u64,
    encoding: &'static Encoding,
) -> FrxResult<Vec<String>> {
    seek_record(reader, offset)?;

    let mut raw = [0u8; LIST_HEADER_LEN];
    reader.read_exact(&mut raw)?;
    let header = RawListHeader::read_from_bytes(&raw)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "invalid list record header"))?;

    let count = header.count.get() as usize;
    log::trace!(
        "list record at {:#X}: {} items, longest {}",
        offset,
        count,
        header.max_item_len.get()
    );

    let mut items = Vec::with_capacity(count);
    let mut len_buf = [0u8; 2];
    for _ in 0..count {
        reader.read_exact(&mut len_buf)?;
        let len = U16::<LE>::read_from_bytes(&len_buf)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "invalid list item length"))?
            .get() as usize;
        let mut item = vec![0u8; len];
        reader.read_exact(&mut item)?;
        items.push(decode_text(&item, encoding).into_owned());
    }

    Ok(items)
}

/// Position the reader at `offset`, returning how many bytes remain.
fn seek_record<R: Read + Seek>(reader: &mut R, offset: u64) -> io::Result<u64> {
    let len = reader.seek(SeekFrom::End(0))?;
    if offset >= len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "record offset {:#X} is past the end of the container ({} bytes)",
                offset, len
            ),
        ));
    }
    reader.seek(SeekFrom::Start(offset))?;
    Ok(len - offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn binary_record(reserved: (u32, u32), payload: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&reserved.0.to_le_bytes());
        data.extend_from_slice(&reserved.1.to_le_bytes());
        data.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        data.extend_from_slice(payload);
        data
    }

    #[test]
    fn test_binary_record_at_offset() {
        let mut container = vec![0xAAu8; 7];
        container.extend(binary_record((0, 0), &[0xDE, 0xAD, 0xBE, 0xEF]));
        container.extend_from_slice(b"trailing");

        let data = read_binary_record(&mut Cursor::new(container), 7).unwrap();
        assert_eq!(data, vec![0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_binary_record_zero_size_ignores_trailing_bytes() {
        let mut container = binary_record((0x1234, 0x5678), &[]);
        container.extend_from_slice(&[1, 2, 3, 4]);

        let data = read_binary_record(&mut Cursor::new(container), 0).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_binary_record_short_payload_is_io_error() {
        let mut container = Vec::new();
        container.extend_from_slice(&0u32.to_le_bytes());
        container.extend_from_slice(&0u32.to_le_bytes());
        container.extend_from_slice(&10u32.to_le_bytes());
        container.extend_from_slice(&[1, 2, 3]);

        let err = read_binary_record(&mut Cursor::new(container), 0).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_binary_record_truncated_header() {
        let err = read_binary_record(&mut Cursor::new(vec![0u8; 5]), 0).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_offset_past_end_is_io_error() {
        let container = binary_record((0, 0), &[1]);
        let err = read_binary_record(&mut Cursor::new(container), 0x100).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_list_record() {
        let mut container = Vec::new();
        container.extend_from_slice(&2u16.to_le_bytes());
        container.extend_from_slice(&5u16.to_le_bytes());
        container.extend_from_slice(&3u16.to_le_bytes());
        container.extend_from_slice(b"abc");
        container.extend_from_slice(&2u16.to_le_bytes());
        container.extend_from_slice(b"xy");

        let items =
            read_list_record(&mut Cursor::new(container), 0, encoding_rs::WINDOWS_1252).unwrap();
        assert_eq!(items, vec!["abc".to_string(), "xy".to_string()]);
    }

    #[test]
    fn test_list_items_longer_than_declared_maximum() {
        let mut container = Vec::new();
        container.extend_from_slice(&1u16.to_le_bytes());
        container.extend_from_slice(&1u16.to_le_bytes());
        container.extend_from_slice(&6u16.to_le_bytes());
        container.extend_from_slice(b"longer");

        let items =
            read_list_record(&mut Cursor::new(container), 0, encoding_rs::WINDOWS_1252).unwrap();
        assert_eq!(items, vec!["longer".to_string()]);
    }

    #[test]
    fn test_list_truncated_item_is_io_error() {
        let mut container = Vec::new();
        container.extend_from_slice(&1u16.to_le_bytes());
        container.extend_from_slice(&8u16.to_le_bytes());
        container.extend_from_slice(&8u16.to_le_bytes());
        container.extend_from_slice(b"abc");

        let err = read_list_record(&mut Cursor::new(container), 0, encoding_rs::WINDOWS_1252)
            .unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_list_items_use_codepage() {
        let mut container = Vec::new();
        container.extend_from_slice(&1u16.to_le_bytes());
        container.extend_from_slice(&4u16.to_le_bytes());
        container.extend_from_slice(&4u16.to_le_bytes());
        container.extend_from_slice(b"caf\xE9");

        let items =
            read_list_record(&mut Cursor::new(container), 0, encoding_rs::WINDOWS_1252).unwrap();
        assert_eq!(items, vec!["café".to_string()]);
    }

    #[test]
    fn test_read_resource_dispatch() {
        let container = binary_record((0, 0), b"hi");
        let resource = read_resource_from(
            &mut Cursor::new(container),
            0,
            ResourceKind::Binary,
            encoding_rs::WINDOWS_1252,
        )
        .unwrap();
        assert_eq!(resource.kind(), ResourceKind::Binary);
        assert_eq!(resource.as_bytes(), Some(&b"hi"[..]));
        assert_eq!(resource.as_list(), None);
    }

    #[test]
    fn test_missing_container_is_io_error() {
        let locator = Locator {
            path: std::path::PathBuf::from("definitely/not/here.frx"),
            offset: 0,
        };
        let err = read_binary(&locator).unwrap_err();
        assert!(err.is_io());
    }
}
