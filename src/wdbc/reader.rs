//! DBC record decoding.
//!
//! [`decode`] validates the header against the schema, then walks every
//! record field by field. Numeric fields are read in place; string fields
//! hold a 4-byte offset that is resolved against the [`StringPool`] without
//! moving the record cursor.
//!
//! Records are laid out back to back starting at byte 20, each exactly
//! `record_size` bytes long. Bytes a schema does not describe at the end of
//! a record are skipped.

use byteorder::{ByteOrder, LittleEndian};
use tracing::debug;

use crate::wdbc::constants::*;
use crate::wdbc::field_decode::{self, DecodedValue, FieldValue, LocalizedString};
use crate::wdbc::header::DbcHeader;
use crate::wdbc::schema::{FieldDescriptor, FieldKind, Schema};
use crate::wdbc::table::{Column, ForeignKey, Row, Table};
use crate::DbcError;

/// The string block at the end of a DBC file.
#[derive(Debug, Clone, Copy)]
pub struct StringPool<'a> {
    data: &'a [u8],
}

impl<'a> StringPool<'a> {
    /// Borrow the string pool of `file` as described by `header`.
    pub fn new(file: &'a [u8], header: &DbcHeader) -> Result<Self, DbcError> {
        header.validate_length(file.len())?;
        let start = header.string_pool_offset as usize;
        let end = header.string_pool_end() as usize;
        Ok(StringPool {
            data: &file[start..end],
        })
    }

    pub fn from_bytes(data: &'a [u8]) -> Self {
        StringPool { data }
    }

    /// Read the NUL-terminated string at `offset` and escape it for SQL.
    ///
    /// The scan stops at the first NUL or at the end of the pool, whichever
    /// comes first. An offset equal to the pool length yields an empty
    /// string; anything past it is a format error.
    pub fn resolve(&self, offset: u32) -> Result<String, DbcError> {
        let start = offset as usize;
        if start > self.data.len() {
            return Err(DbcError::Format(format!(
                "String offset {} is outside the string pool ({} bytes)",
                offset,
                self.data.len()
            )));
        }
        let tail = &self.data[start..];
        let raw = match tail.iter().position(|&b| b == 0) {
            Some(nul) => &tail[..nul],
            None => tail,
        };
        Ok(field_decode::escape_sql(&String::from_utf8_lossy(raw)))
    }
}

/// Read position inside one record.
///
/// Cursors are plain values: every read returns the advanced cursor rather
/// than mutating shared state, so a string-pool lookup can never disturb
/// the record position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordCursor {
    row: u32,
    pos: usize,
    end: usize,
}

impl RecordCursor {
    /// Cursor at the start of record `row`.
    pub fn for_row(header: &DbcHeader, row: u32) -> Self {
        let pos = header.record_offset(row) as usize;
        RecordCursor {
            row,
            pos,
            end: pos + header.record_size as usize,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left in the current record.
    pub fn remaining(&self) -> usize {
        self.end.saturating_sub(self.pos)
    }

    /// Take `width` bytes from the record.
    pub fn take<'a>(self, data: &'a [u8], width: usize) -> Result<(&'a [u8], Self), DbcError> {
        let next = self.pos + width;
        if next > self.end || next > data.len() {
            return Err(DbcError::Format(format!(
                "Schema reads past the end of record {} (record ends at byte {}, read needs {})",
                self.row, self.end, next
            )));
        }
        Ok((&data[self.pos..next], RecordCursor { pos: next, ..self }))
    }

    fn read_u32(self, data: &[u8]) -> Result<(u32, Self), DbcError> {
        let (bytes, next) = self.take(data, SIZE_INT_FIELD)?;
        Ok((LittleEndian::read_u32(bytes), next))
    }
}

/// Key metadata gathered while decoding the first row.
#[derive(Debug, Default)]
struct KeyLists {
    primary_keys: Vec<String>,
    foreign_keys: Vec<ForeignKey>,
}

impl KeyLists {
    fn record(&mut self, field: &FieldDescriptor) {
        if field.kind == FieldKind::Primary {
            self.primary_keys.push(field.name.clone());
        }
        if let Some(fk) = &field.foreign_key {
            self.foreign_keys.push(ForeignKey {
                column: field.name.clone(),
                table: fk.table.clone(),
                foreign_column: fk.column.clone(),
            });
        }
    }
}

/// Decode a complete DBC file into a [`Table`].
///
/// Fails with [`DbcError::Format`] if the magic is wrong, the schema's slot
/// count differs from the header's column count, the schema declares a
/// localized string for a client version without a known layout, the file
/// is truncated, or a string offset points outside the string pool.
pub fn decode(schema: &Schema, data: &[u8]) -> Result<Table, DbcError> {
    let header = DbcHeader::parse(data)?;
    let locale_count = schema.locale_count();

    if schema.has_localized_fields() && locale_count == 0 {
        return Err(DbcError::Format(format!(
            "Schema declares localized_string fields but client version \"{}\" has no known locale layout",
            schema.version
        )));
    }

    let expected = schema.slot_count();
    if expected != header.column_count as usize {
        return Err(DbcError::Format(format!(
            "The schema's number of format elements doesn't match the dbc's number of columns (expected: {}, given: {})",
            expected, header.column_count
        )));
    }

    let min_record_size = schema.min_record_size();
    if (header.record_size as usize) < min_record_size {
        return Err(DbcError::Format(format!(
            "The dbc's record size is smaller than the schema's fields (expected at least: {}, given: {})",
            min_record_size, header.record_size
        )));
    }

    let pool = StringPool::new(data, &header)?;

    // Every row occupies at least one byte of the file from here on.
    let record_area = data.len().saturating_sub(SIZE_DBC_HEADER);
    let capacity = (header.row_count as usize).min(record_area / min_record_size.max(1));

    let mut keys = KeyLists::default();
    let mut rows = Vec::with_capacity(capacity);
    for row in 0..header.row_count {
        let cursor = RecordCursor::for_row(&header, row);
        let collect = if row == 0 { Some(&mut keys) } else { None };
        let (values, end) = decode_row(schema, data, &pool, cursor, collect, locale_count)?;
        if row == 0 && end.remaining() > 0 {
            debug!(
                table = %schema.table_name,
                padding = end.remaining(),
                "record has bytes not described by the schema"
            );
        }
        rows.push(values);
    }

    // Without a first row there is no walk to collect keys from; take them
    // straight from the schema so the DDL stays complete.
    if header.row_count == 0 {
        schema.fields.iter().for_each(|f| keys.record(f));
    }

    debug!(
        table = %schema.table_name,
        rows = rows.len(),
        primary_keys = keys.primary_keys.len(),
        foreign_keys = keys.foreign_keys.len(),
        "decoded dbc"
    );

    let columns = schema
        .fields
        .iter()
        .map(|f| Column::from_descriptor(f, locale_count))
        .collect();

    Ok(Table::new(
        schema.table_name.clone(),
        columns,
        rows,
        keys.primary_keys,
        keys.foreign_keys,
    ))
}

/// Decode one record. Key metadata is recorded into `keys` when given.
fn decode_row(
    schema: &Schema,
    data: &[u8],
    pool: &StringPool<'_>,
    mut cursor: RecordCursor,
    mut keys: Option<&mut KeyLists>,
    locale_count: usize,
) -> Result<(Row, RecordCursor), DbcError> {
    let mut row = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        if let Some(keys) = keys.as_deref_mut() {
            keys.record(field);
        }
        let (value, next) = decode_field(field, data, pool, cursor, locale_count)?;
        row.push(value);
        cursor = next;
    }
    Ok((row, cursor))
}

/// Decode a single field at `cursor`, returning the value and the advanced
/// cursor.
pub fn decode_field(
    field: &FieldDescriptor,
    data: &[u8],
    pool: &StringPool<'_>,
    cursor: RecordCursor,
    locale_count: usize,
) -> Result<(DecodedValue, RecordCursor), DbcError> {
    let (value, next) = match field.kind {
        FieldKind::Byte
        | FieldKind::Primary
        | FieldKind::Int
        | FieldKind::UInt
        | FieldKind::Float => {
            let (bytes, next) = cursor.take(data, field_decode::field_width(field.kind))?;
            let value = field_decode::decode_numeric(bytes, field.kind)
                .ok_or_else(|| DbcError::Format(format!("Cannot decode `{}`", field.name)))?;
            (value, next)
        }
        FieldKind::String => {
            let (offset, next) = cursor.read_u32(data)?;
            (FieldValue::Str(pool.resolve(offset)?), next)
        }
        FieldKind::LocalizedString => {
            let (localized, next) = read_localized(data, pool, cursor, locale_count)?;
            (FieldValue::Localized(localized), next)
        }
    };

    let is_null = field.is_null(&value);
    Ok((DecodedValue::new(value, is_null), next))
}

/// Read `locale_count` string references followed by the flags word.
fn read_localized(
    data: &[u8],
    pool: &StringPool<'_>,
    mut cursor: RecordCursor,
    locale_count: usize,
) -> Result<(LocalizedString, RecordCursor), DbcError> {
    let mut strings = Vec::with_capacity(locale_count);
    for _ in 0..locale_count {
        let (offset, next) = cursor.read_u32(data)?;
        strings.push(pool.resolve(offset)?);
        cursor = next;
    }
    let (bytes, cursor) = cursor.take(data, SIZE_LOCALE_FLAGS)?;
    let flags = LittleEndian::read_u32(bytes);
    Ok((LocalizedString { strings, flags }, cursor))
}
