//! DBC file structure constants.
//!
//! All multi-byte integers in a DBC file are little-endian.

// File magic
pub const DBC_MAGIC: &[u8; 4] = b"WDBC";

// Header (20 bytes total)
pub const SIZE_DBC_HEADER: usize = 20;
pub const DBC_MAGIC_OFFSET: usize = 0; // 4 bytes - "WDBC"
pub const DBC_ROW_COUNT: usize = 4; // 4 bytes - number of records
pub const DBC_COLUMN_COUNT: usize = 8; // 4 bytes - number of 4-byte slots per record
pub const DBC_RECORD_SIZE: usize = 12; // 4 bytes - bytes per record
pub const DBC_STRING_BLOCK_SIZE: usize = 16; // 4 bytes - string pool length

// Field widths within a record
pub const SIZE_BYTE_FIELD: usize = 1;
pub const SIZE_INT_FIELD: usize = 4;
pub const SIZE_FLOAT_FIELD: usize = 4;
pub const SIZE_STRING_REF: usize = 4;
pub const SIZE_LOCALE_FLAGS: usize = 4;

// Schema attribute and node names
pub const SCHEMA_ROOT: &str = "file";
pub const SCHEMA_NAME: &str = "name";
pub const SCHEMA_VERSION: &str = "version";
pub const SCHEMA_FORMAT: &str = "format";
pub const ATTR_REFERS_TO: &str = "refersTo";
pub const ATTR_NULL_VALUES: &str = "nullValues";
pub const NULL_VALUES_SEPARATOR: char = ';';
pub const REFERS_TO_SEPARATOR: char = '.';
