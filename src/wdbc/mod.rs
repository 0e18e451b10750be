//! DBC binary format decoding and SQL rendering.
//!
//! A `.dbc` file is a 20-byte header, `row_count` fixed-size records and a
//! trailing string pool of NUL-terminated strings referenced by offset. The
//! file carries no column metadata of its own, so decoding is driven by a
//! [`schema::Schema`] built from an XML description.
//!
//! The pipeline is `xml` → `schema` → `reader` → `table` → `sql`. Start with
//! [`reader::decode`] and [`sql::emit`].

pub mod constants;
pub mod field_decode;
pub mod header;
pub mod locale;
pub mod reader;
pub mod schema;
pub mod sql;
pub mod table;
pub mod xml;
