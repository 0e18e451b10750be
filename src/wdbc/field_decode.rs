//! Field-level value decoding for DBC records.
//!
//! Decodes the fixed-width little-endian values stored in a record into
//! typed [`FieldValue`]s, coerces `nullValues` literals into the same types
//! for sentinel comparison, and escapes text pulled from the string pool so
//! it can be embedded in a single-quoted SQL literal.
//!
//! # Supported kinds
//!
//! | Schema kind | Width | Decoded as |
//! |-------------|-------|------------|
//! | `byte` | 1 | `u8` |
//! | `int` | 4 | `i32` |
//! | `uint`, `primary` | 4 | `u32` |
//! | `float` | 4 | `f32` |
//! | `string` | 4 (offset) | escaped `String` |
//! | `localized_string` | 4 × (locales + 1) | [`LocalizedString`] |

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

use crate::wdbc::constants::*;
use crate::wdbc::schema::FieldKind;

/// Decoded field value from a DBC record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Byte(u8),
    Int(i32),
    UInt(u32),
    Float(f32),
    /// String pool text, already escaped for SQL.
    Str(String),
    Localized(LocalizedString),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Byte(v) => write!(f, "{}", v),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::UInt(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Localized(l) => write!(f, "{}", l),
        }
    }
}

/// Per-locale strings plus the trailing flags word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocalizedString {
    /// One escaped string per locale, in on-disk locale order.
    pub strings: Vec<String>,
    pub flags: u32,
}

impl fmt::Display for LocalizedString {
    /// Renders every slot as its own quoted literal: `'a', 'b', '7'`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.strings {
            write!(f, "'{}', ", s)?;
        }
        write!(f, "'{}'", self.flags)
    }
}

/// A decoded value together with its null flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedValue {
    pub value: FieldValue,
    pub is_null: bool,
}

impl DecodedValue {
    pub fn new(value: FieldValue, is_null: bool) -> Self {
        DecodedValue { value, is_null }
    }

    /// Header column slots this value occupies.
    pub fn slot_count(&self) -> usize {
        match &self.value {
            FieldValue::Localized(l) => l.strings.len() + 1,
            _ => 1,
        }
    }
}

/// Width in bytes of a fixed-width kind's on-disk value.
///
/// String kinds report the width of their 4-byte pool reference;
/// localized strings are read slot by slot and report a single slot.
pub fn field_width(kind: FieldKind) -> usize {
    match kind {
        FieldKind::Byte => SIZE_BYTE_FIELD,
        FieldKind::Primary | FieldKind::Int | FieldKind::UInt => SIZE_INT_FIELD,
        FieldKind::Float => SIZE_FLOAT_FIELD,
        FieldKind::String | FieldKind::LocalizedString => SIZE_STRING_REF,
    }
}

/// Decode a numeric field from exactly [`field_width`] bytes.
///
/// Returns `None` for string kinds, which need the string pool.
pub fn decode_numeric(data: &[u8], kind: FieldKind) -> Option<FieldValue> {
    if data.len() < field_width(kind) {
        return None;
    }
    match kind {
        FieldKind::Byte => Some(FieldValue::Byte(data[0])),
        FieldKind::Int => Some(FieldValue::Int(LittleEndian::read_i32(data))),
        FieldKind::UInt | FieldKind::Primary => Some(FieldValue::UInt(LittleEndian::read_u32(data))),
        FieldKind::Float => Some(FieldValue::Float(LittleEndian::read_f32(data))),
        FieldKind::String | FieldKind::LocalizedString => None,
    }
}

/// Coerce a `nullValues` literal to the value type of `kind`.
///
/// Numeric literals are trimmed before parsing; string literals are compared
/// verbatim against the escaped pool text. Returns `None` if the literal is
/// not a valid value of that type.
pub fn parse_sentinel(kind: FieldKind, literal: &str) -> Option<FieldValue> {
    let trimmed = literal.trim();
    match kind {
        FieldKind::Byte => trimmed.parse().ok().map(FieldValue::Byte),
        FieldKind::Int => trimmed.parse().ok().map(FieldValue::Int),
        FieldKind::UInt | FieldKind::Primary => trimmed.parse().ok().map(FieldValue::UInt),
        FieldKind::Float => trimmed.parse().ok().map(FieldValue::Float),
        FieldKind::String => Some(FieldValue::Str(literal.to_string())),
        FieldKind::LocalizedString => None,
    }
}

/// Whether a decoded value equals a coerced sentinel.
///
/// A `NaN` sentinel matches any `NaN` value.
pub fn sentinel_matches(sentinel: &FieldValue, value: &FieldValue) -> bool {
    match (sentinel, value) {
        (FieldValue::Localized(_), _) | (_, FieldValue::Localized(_)) => false,
        (FieldValue::Float(a), FieldValue::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
        _ => sentinel == value,
    }
}

/// Bytes that must be backslash-escaped inside a SQL string literal:
/// NUL, backspace, tab, LF, CR, SUB (Ctrl-Z), `"`, `'`, `\` and `` ` ``.
pub const SQL_SPECIAL_CHARS: [char; 10] = [
    '\0', '\u{8}', '\t', '\n', '\r', '\u{1a}', '"', '\'', '\\', '`',
];

/// Prefix every [`SQL_SPECIAL_CHARS`] character with a backslash.
pub fn escape_sql(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if SQL_SPECIAL_CHARS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
