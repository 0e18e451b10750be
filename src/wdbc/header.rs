//! DBC file header parsing.
//!
//! Every DBC file begins with a 20-byte header ([`DbcHeader`]): the `WDBC`
//! magic followed by the row count, column count, record size and string
//! pool length. The string pool's starting offset is not stored; it is
//! derived from the record area that precedes it.

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;
use tracing::debug;

use crate::wdbc::constants::*;
use crate::DbcError;

/// Parsed DBC header (20 bytes at the start of every file).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DbcHeader {
    /// Number of records. Bytes 4-7.
    pub row_count: u32,
    /// Number of 4-byte column slots per record. Bytes 8-11.
    pub column_count: u32,
    /// Size of one record in bytes. Bytes 12-15.
    pub record_size: u32,
    /// Absolute file offset where the string pool begins (derived).
    pub string_pool_offset: u64,
    /// Length of the string pool in bytes. Bytes 16-19.
    pub string_pool_length: u32,
}

impl DbcHeader {
    /// Parse a DBC header from the start of a file's bytes.
    ///
    /// Fails if the slice is shorter than [`SIZE_DBC_HEADER`] or does not
    /// start with the `WDBC` magic.
    pub fn parse(data: &[u8]) -> Result<Self, DbcError> {
        if data.len() < SIZE_DBC_HEADER {
            return Err(DbcError::Format(format!(
                "File is too small to be a .dbc file ({} bytes, header needs {})",
                data.len(),
                SIZE_DBC_HEADER
            )));
        }

        let magic = &data[DBC_MAGIC_OFFSET..DBC_MAGIC_OFFSET + DBC_MAGIC.len()];
        if magic != DBC_MAGIC {
            return Err(DbcError::Format(format!(
                "File must be a .dbc file (magic check failed: expected {:?}, found {:?})",
                String::from_utf8_lossy(DBC_MAGIC),
                String::from_utf8_lossy(magic)
            )));
        }

        let row_count = LittleEndian::read_u32(&data[DBC_ROW_COUNT..]);
        let column_count = LittleEndian::read_u32(&data[DBC_COLUMN_COUNT..]);
        let record_size = LittleEndian::read_u32(&data[DBC_RECORD_SIZE..]);
        let string_pool_length = LittleEndian::read_u32(&data[DBC_STRING_BLOCK_SIZE..]);

        let header = DbcHeader {
            row_count,
            column_count,
            record_size,
            string_pool_offset: string_pool_offset(row_count, record_size),
            string_pool_length,
        };
        debug!(
            rows = header.row_count,
            columns = header.column_count,
            record_size = header.record_size,
            string_pool_offset = header.string_pool_offset,
            string_pool_length = header.string_pool_length,
            "parsed dbc header"
        );
        Ok(header)
    }

    /// Absolute offset one past the last byte of the string pool.
    pub fn string_pool_end(&self) -> u64 {
        self.string_pool_offset + u64::from(self.string_pool_length)
    }

    /// Absolute offset of the first byte of record `row`.
    pub fn record_offset(&self, row: u32) -> u64 {
        SIZE_DBC_HEADER as u64 + u64::from(self.record_size) * u64::from(row)
    }

    /// Check that the record area and string pool fit inside a file of
    /// `file_len` bytes.
    pub fn validate_length(&self, file_len: usize) -> Result<(), DbcError> {
        let needed = self.string_pool_end();
        if needed > file_len as u64 {
            return Err(DbcError::Format(format!(
                "File is truncated: header describes {} bytes (records end at {}, string pool of {} bytes), file has {}",
                needed, self.string_pool_offset, self.string_pool_length, file_len
            )));
        }
        Ok(())
    }
}

/// Derive where the string pool starts.
///
/// The pool follows the record area directly: `20 + record_size * row_count`.
/// Per-column widths are never rounded, so a record size that is not a
/// multiple of the column count (records containing byte fields) still
/// places the pool exactly after the last record.
pub fn string_pool_offset(row_count: u32, record_size: u32) -> u64 {
    SIZE_DBC_HEADER as u64 + u64::from(record_size) * u64::from(row_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_header_bytes(
        magic: &[u8; 4],
        rows: u32,
        columns: u32,
        record_size: u32,
        string_len: u32,
    ) -> Vec<u8> {
        let mut buf = vec![0u8; SIZE_DBC_HEADER];
        buf[..4].copy_from_slice(magic);
        LittleEndian::write_u32(&mut buf[DBC_ROW_COUNT..], rows);
        LittleEndian::write_u32(&mut buf[DBC_COLUMN_COUNT..], columns);
        LittleEndian::write_u32(&mut buf[DBC_RECORD_SIZE..], record_size);
        LittleEndian::write_u32(&mut buf[DBC_STRING_BLOCK_SIZE..], string_len);
        buf
    }

    #[test]
    fn test_header_parse() {
        let data = make_header_bytes(DBC_MAGIC, 10, 4, 16, 33);
        let hdr = DbcHeader::parse(&data).unwrap();
        assert_eq!(hdr.row_count, 10);
        assert_eq!(hdr.column_count, 4);
        assert_eq!(hdr.record_size, 16);
        assert_eq!(hdr.string_pool_length, 33);
        assert_eq!(hdr.string_pool_offset, 20 + 160);
        assert_eq!(hdr.string_pool_end(), 20 + 160 + 33);
    }

    #[test]
    fn test_header_bad_magic() {
        let data = make_header_bytes(b"XDBC", 1, 1, 4, 0);
        let err = DbcHeader::parse(&data).unwrap_err();
        assert!(matches!(err, DbcError::Format(_)));
        assert!(err.to_string().contains("magic"));
    }

    #[test]
    fn test_header_too_short() {
        let data = vec![0u8; 10];
        assert!(DbcHeader::parse(&data).is_err());
    }

    #[test]
    fn test_string_pool_offset_uneven_record_size() {
        // 3 slots in 9 bytes: two ints and a byte field padded to 9.
        assert_eq!(string_pool_offset(7, 9), 20 + 63);
        assert_eq!(string_pool_offset(0, 9), 20);
    }

    #[test]
    fn test_record_offset() {
        let data = make_header_bytes(DBC_MAGIC, 3, 2, 8, 1);
        let hdr = DbcHeader::parse(&data).unwrap();
        assert_eq!(hdr.record_offset(0), 20);
        assert_eq!(hdr.record_offset(2), 36);
    }

    #[test]
    fn test_validate_length() {
        let data = make_header_bytes(DBC_MAGIC, 2, 1, 4, 5);
        let hdr = DbcHeader::parse(&data).unwrap();
        assert!(hdr.validate_length(20 + 8 + 5).is_ok());
        assert!(hdr.validate_length(20 + 8 + 4).is_err());
    }
}
