//! The decoded table model handed from the reader to the SQL emitter.
//!
//! A [`Table`] is built once by [`crate::wdbc::reader::decode`] and never
//! mutated afterwards. Column metadata comes from the schema; primary and
//! foreign key lists are gathered while the first row is decoded.

use serde::Serialize;

use crate::wdbc::field_decode::DecodedValue;
use crate::wdbc::schema::{FieldDescriptor, FieldKind};

/// Column metadata for one schema field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub kind: FieldKind,
    /// True if the field has at least one null sentinel.
    pub nullable: bool,
    /// Per-locale strings for `localized_string` columns, 0 otherwise.
    pub locale_count: usize,
}

impl Column {
    pub fn from_descriptor(field: &FieldDescriptor, locale_count: usize) -> Self {
        Column {
            name: field.name.clone(),
            kind: field.kind,
            nullable: field.is_nullable(),
            locale_count: if field.kind == FieldKind::LocalizedString {
                locale_count
            } else {
                0
            },
        }
    }

    /// Header column slots this column occupies.
    pub fn slot_count(&self) -> usize {
        self.kind.slot_count(self.locale_count)
    }
}

/// A column referencing another table's column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    /// Referencing column in this table.
    pub column: String,
    /// Referenced table.
    pub table: String,
    /// Referenced column.
    pub foreign_column: String,
}

/// One decoded row: one value per schema field.
pub type Row = Vec<DecodedValue>;

/// A fully decoded DBC table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
    primary_keys: Vec<String>,
    foreign_keys: Vec<ForeignKey>,
}

impl Table {
    pub fn new(
        name: String,
        columns: Vec<Column>,
        rows: Vec<Row>,
        primary_keys: Vec<String>,
        foreign_keys: Vec<ForeignKey>,
    ) -> Self {
        Table {
            name,
            columns,
            rows,
            primary_keys,
            foreign_keys,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn primary_keys(&self) -> &[String] {
        &self.primary_keys
    }

    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Header column slots one row occupies.
    pub fn slot_count(&self) -> usize {
        self.columns.iter().map(Column::slot_count).sum()
    }
}
