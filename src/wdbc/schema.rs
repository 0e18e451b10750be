//! Schema model: from a parsed schema tree to physical field layout.
//!
//! A DBC file carries no column metadata, so every conversion is driven by
//! an XML description of the record layout:
//!
//! ```xml
//! <file>
//!     <name>ChrClasses</name>
//!     <version>2.4.3</version>
//!     <format>
//!         <primary>id</primary>
//!         <uint nullValues="0">power_type</uint>
//!         <uint refersTo="CinematicSequences.id" nullValues="0">cinematic</uint>
//!         <localized_string>name</localized_string>
//!     </format>
//! </file>
//! ```
//!
//! The textual syntax is handled by [`crate::wdbc::xml`]; this module only
//! sees the resulting [`SchemaNode`] tree and turns it into an ordered list
//! of [`FieldDescriptor`]s.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::wdbc::constants::*;
use crate::wdbc::field_decode::{self, FieldValue};
use crate::wdbc::locale;
use crate::DbcError;

/// One element of a parsed schema document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaNode {
    /// Element name (`file`, `name`, `uint`, ...).
    pub name: String,
    /// Concatenated text content, whitespace-trimmed.
    pub text: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order.
    pub children: Vec<SchemaNode>,
}

impl SchemaNode {
    pub fn new(name: &str) -> Self {
        SchemaNode {
            name: name.to_string(),
            ..SchemaNode::default()
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_child(mut self, child: SchemaNode) -> Self {
        self.children.push(child);
        self
    }

    /// Value of the first attribute named `key`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First child element named `name`.
    pub fn child(&self, name: &str) -> Option<&SchemaNode> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// Physical kind of a schema field, selected by the format element's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    /// `byte`: 1-byte unsigned integer.
    Byte,
    /// `primary`: 4-byte unsigned integer that is part of the primary key.
    Primary,
    /// `int`: 4-byte signed integer.
    Int,
    /// `uint`: 4-byte unsigned integer.
    UInt,
    /// `float`: 4-byte IEEE 754 single-precision float.
    Float,
    /// `string`: 4-byte offset into the string pool.
    String,
    /// `localized_string`: one string offset per locale plus a flags word.
    LocalizedString,
}

impl FieldKind {
    /// Every kind, in the order they are documented.
    pub const ALL: [FieldKind; 7] = [
        FieldKind::Byte,
        FieldKind::Primary,
        FieldKind::Int,
        FieldKind::UInt,
        FieldKind::Float,
        FieldKind::String,
        FieldKind::LocalizedString,
    ];

    /// Map a format element name to a field kind.
    pub fn from_node_name(name: &str) -> Option<Self> {
        match name {
            "byte" => Some(FieldKind::Byte),
            "primary" => Some(FieldKind::Primary),
            "int" => Some(FieldKind::Int),
            "uint" => Some(FieldKind::UInt),
            "float" => Some(FieldKind::Float),
            "string" => Some(FieldKind::String),
            "localized_string" => Some(FieldKind::LocalizedString),
            _ => None,
        }
    }

    /// The format element name for this kind.
    pub fn node_name(self) -> &'static str {
        match self {
            FieldKind::Byte => "byte",
            FieldKind::Primary => "primary",
            FieldKind::Int => "int",
            FieldKind::UInt => "uint",
            FieldKind::Float => "float",
            FieldKind::String => "string",
            FieldKind::LocalizedString => "localized_string",
        }
    }

    /// Number of header column slots this kind occupies.
    pub fn slot_count(self, locale_count: usize) -> usize {
        match self {
            FieldKind::LocalizedString => locale_count + 1,
            _ => 1,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.node_name())
    }
}

/// Target of a `refersTo` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyRef {
    pub table: String,
    pub column: String,
}

impl ForeignKeyRef {
    /// Parse `Table.Column`. Only the first `.` separates the two parts.
    pub fn parse(text: &str) -> Result<Self, DbcError> {
        let text = text.trim();
        match text.split_once(REFERS_TO_SEPARATOR) {
            Some((table, column)) if !table.is_empty() && !column.is_empty() => {
                Ok(ForeignKeyRef {
                    table: table.to_string(),
                    column: column.to_string(),
                })
            }
            _ => Err(DbcError::Schema(format!(
                "Foreign key must have format \"Table.Column\" (got \"{}\")",
                text
            ))),
        }
    }
}

/// One schema field: kind, column name, null sentinels and optional
/// foreign key.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub kind: FieldKind,
    pub name: String,
    /// Raw `nullValues` literals as written in the schema.
    pub null_values: Vec<String>,
    pub foreign_key: Option<ForeignKeyRef>,
    sentinels: Vec<FieldValue>,
}

impl FieldDescriptor {
    /// Build a descriptor, coercing each null literal to the field's type.
    ///
    /// Literals that cannot be coerced (e.g. `"-1"` on a `byte`) are a
    /// schema error.
    pub fn new(
        kind: FieldKind,
        name: &str,
        null_values: Vec<String>,
        foreign_key: Option<ForeignKeyRef>,
    ) -> Result<Self, DbcError> {
        let mut sentinels = Vec::with_capacity(null_values.len());
        if kind == FieldKind::LocalizedString {
            if !null_values.is_empty() {
                warn!(field = name, "nullValues has no effect on localized_string fields");
            }
        } else {
            for literal in &null_values {
                match field_decode::parse_sentinel(kind, literal) {
                    Some(value) => sentinels.push(value),
                    None if literal.trim().is_empty() && kind != FieldKind::String => {}
                    None => {
                        return Err(DbcError::Schema(format!(
                            "Null value \"{}\" of column `{}` is not a valid {}",
                            literal, name, kind
                        )))
                    }
                }
            }
        }

        Ok(FieldDescriptor {
            kind,
            name: name.to_string(),
            null_values,
            foreign_key,
            sentinels,
        })
    }

    /// Whether the column accepts SQL `NULL`: at least one usable sentinel.
    pub fn is_nullable(&self) -> bool {
        !self.sentinels.is_empty()
    }

    /// Whether a decoded raw value matches one of the configured sentinels.
    pub fn is_null(&self, value: &FieldValue) -> bool {
        self.sentinels.iter().any(|s| field_decode::sentinel_matches(s, value))
    }

    /// Build a descriptor from one `<format>` child element.
    fn from_node(node: &SchemaNode) -> Result<Self, DbcError> {
        let kind = FieldKind::from_node_name(&node.name).ok_or_else(|| {
            DbcError::Format(format!("Unexpected field type '{}'", node.name))
        })?;

        let name = node.text.trim();
        if name.is_empty() {
            return Err(DbcError::Schema(format!(
                "<{}> element in <format> has no column name",
                node.name
            )));
        }

        let mut null_values = Vec::new();
        let mut foreign_key = None;
        for (key, value) in &node.attributes {
            match key.as_str() {
                ATTR_NULL_VALUES => null_values.extend(
                    value
                        .split(NULL_VALUES_SEPARATOR)
                        .map(|v| v.to_string()),
                ),
                ATTR_REFERS_TO => foreign_key = Some(ForeignKeyRef::parse(value)?),
                _ => {}
            }
        }

        FieldDescriptor::new(kind, name, null_values, foreign_key)
    }
}

/// Ordered field layout of one DBC table.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub table_name: String,
    /// Client version string; selects the localized-string layout.
    pub version: String,
    pub fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Build a schema from the root nodes of a parsed document.
    ///
    /// Requires exactly one `<file>` root with a non-empty `<name>` and a
    /// non-empty `<format>`. `<version>` is optional; without a known version
    /// `localized_string` fields cannot be decoded.
    pub fn from_tree(roots: &[SchemaNode]) -> Result<Self, DbcError> {
        let root = match roots {
            [] => {
                return Err(DbcError::Schema(
                    "The schema document mustn't be empty".to_string(),
                ))
            }
            [root] => root,
            _ => {
                return Err(DbcError::Schema(format!(
                    "The schema document mustn't contain more than one <{}> node (found {} root nodes)",
                    SCHEMA_ROOT,
                    roots.len()
                )))
            }
        };

        if root.name != SCHEMA_ROOT {
            return Err(DbcError::Schema(format!(
                "The schema's root node must be <{}>, found <{}>",
                SCHEMA_ROOT, root.name
            )));
        }

        let table_name = root
            .child(SCHEMA_NAME)
            .map(|n| n.text.trim())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| DbcError::Schema("The schema must contain a name".to_string()))?;

        let version = root
            .child(SCHEMA_VERSION)
            .map(|n| n.text.trim().to_string())
            .unwrap_or_default();

        let format = root.child(SCHEMA_FORMAT).ok_or_else(|| {
            DbcError::Schema("The schema must contain a format description".to_string())
        })?;
        if format.children.is_empty() {
            return Err(DbcError::Schema(
                "The schema's format description mustn't be empty".to_string(),
            ));
        }

        let fields = format
            .children
            .iter()
            .map(FieldDescriptor::from_node)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Schema {
            table_name: table_name.to_string(),
            version,
            fields,
        })
    }

    /// Number of per-locale strings for this schema's client version.
    pub fn locale_count(&self) -> usize {
        locale::locale_count(&self.version)
    }

    /// Total header column slots the fields consume.
    pub fn slot_count(&self) -> usize {
        let locales = self.locale_count();
        self.fields.iter().map(|f| f.kind.slot_count(locales)).sum()
    }

    /// Fewest bytes one record must hold for every field to be read.
    pub fn min_record_size(&self) -> usize {
        let locales = self.locale_count();
        self.fields
            .iter()
            .map(|f| field_decode::field_width(f.kind) * f.kind.slot_count(locales))
            .sum()
    }

    pub fn has_localized_fields(&self) -> bool {
        self.fields
            .iter()
            .any(|f| f.kind == FieldKind::LocalizedString)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(kind: &str, name: &str) -> SchemaNode {
        SchemaNode::new(kind).with_text(name)
    }

    fn file_node(version: &str, fields: Vec<SchemaNode>) -> SchemaNode {
        let mut format = SchemaNode::new("format");
        format.children = fields;
        SchemaNode::new("file")
            .with_child(SchemaNode::new("name").with_text("ChrClasses"))
            .with_child(SchemaNode::new("version").with_text(version))
            .with_child(format)
    }

    #[test]
    fn test_from_tree_basic() {
        let root = file_node(
            "2.4.3",
            vec![
                field("primary", "id"),
                field("uint", "power_type").with_attribute("nullValues", "0;4"),
                field("float", "scale"),
            ],
        );
        let schema = Schema::from_tree(&[root]).unwrap();
        assert_eq!(schema.table_name, "ChrClasses");
        assert_eq!(schema.version, "2.4.3");
        assert_eq!(schema.fields.len(), 3);
        assert_eq!(schema.fields[0].kind, FieldKind::Primary);
        assert_eq!(schema.fields[1].null_values, vec!["0", "4"]);
        assert!(schema.fields[1].is_nullable());
        assert!(!schema.fields[2].is_nullable());
        assert_eq!(schema.slot_count(), 3);
    }

    #[test]
    fn test_localized_slot_count() {
        let root = file_node(
            "2.4.3",
            vec![field("primary", "id"), field("localized_string", "name")],
        );
        let schema = Schema::from_tree(&[root]).unwrap();
        assert_eq!(schema.slot_count(), 1 + 17);
        assert!(schema.has_localized_fields());
    }

    #[test]
    fn test_empty_tree() {
        let err = Schema::from_tree(&[]).unwrap_err();
        assert!(matches!(err, DbcError::Schema(_)));
    }

    #[test]
    fn test_multiple_roots() {
        let a = file_node("2.4.3", vec![field("uint", "a")]);
        let b = file_node("2.4.3", vec![field("uint", "b")]);
        let err = Schema::from_tree(&[a, b]).unwrap_err();
        assert!(err.to_string().contains("more than one"));
    }

    #[test]
    fn test_missing_name() {
        let root = SchemaNode::new("file")
            .with_child(SchemaNode::new("format").with_child(field("uint", "a")));
        let err = Schema::from_tree(&[root]).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_missing_or_empty_format() {
        let root = SchemaNode::new("file").with_child(SchemaNode::new("name").with_text("T"));
        assert!(matches!(
            Schema::from_tree(&[root.clone()]).unwrap_err(),
            DbcError::Schema(_)
        ));

        let root = root.with_child(SchemaNode::new("format"));
        let err = Schema::from_tree(&[root]).unwrap_err();
        assert!(err.to_string().contains("mustn't be empty"));
    }

    #[test]
    fn test_missing_version_is_allowed() {
        let root = SchemaNode::new("file")
            .with_child(SchemaNode::new("name").with_text("T"))
            .with_child(SchemaNode::new("format").with_child(field("int", "a")));
        let schema = Schema::from_tree(&[root]).unwrap();
        assert_eq!(schema.version, "");
        assert_eq!(schema.locale_count(), 0);
    }

    #[test]
    fn test_unknown_field_kind_is_format_error() {
        let root = file_node("2.4.3", vec![field("double", "x")]);
        let err = Schema::from_tree(&[root]).unwrap_err();
        assert!(matches!(err, DbcError::Format(_)));
        assert!(err.to_string().contains("double"));
    }

    #[test]
    fn test_refers_to() {
        let root = file_node(
            "2.4.3",
            vec![field("uint", "cinematic").with_attribute("refersTo", "CinematicSequences.id")],
        );
        let schema = Schema::from_tree(&[root]).unwrap();
        let fk = schema.fields[0].foreign_key.as_ref().unwrap();
        assert_eq!(fk.table, "CinematicSequences");
        assert_eq!(fk.column, "id");
    }

    #[test]
    fn test_refers_to_without_separator() {
        let root = file_node(
            "2.4.3",
            vec![field("uint", "cinematic").with_attribute("refersTo", "CinematicSequences")],
        );
        let err = Schema::from_tree(&[root]).unwrap_err();
        assert!(matches!(err, DbcError::Schema(_)));
        assert!(err.to_string().contains("Table.Column"));
    }

    #[test]
    fn test_refers_to_splits_on_first_separator() {
        let fk = ForeignKeyRef::parse("Spell.effect.1").unwrap();
        assert_eq!(fk.table, "Spell");
        assert_eq!(fk.column, "effect.1");
    }

    #[test]
    fn test_invalid_null_value() {
        let root = file_node(
            "2.4.3",
            vec![field("byte", "flags").with_attribute("nullValues", "-1")],
        );
        let err = Schema::from_tree(&[root]).unwrap_err();
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_trailing_separator_in_null_values() {
        let root = file_node(
            "2.4.3",
            vec![field("uint", "a").with_attribute("nullValues", "0;")],
        );
        let schema = Schema::from_tree(&[root]).unwrap();
        assert!(schema.fields[0].is_null(&FieldValue::UInt(0)));
        assert!(!schema.fields[0].is_null(&FieldValue::UInt(1)));
    }

    #[test]
    fn test_blank_null_values_keep_column_not_null() {
        let root = file_node(
            "2.4.3",
            vec![
                field("uint", "a").with_attribute("nullValues", " ; "),
                field("localized_string", "b").with_attribute("nullValues", "0"),
            ],
        );
        let schema = Schema::from_tree(&[root]).unwrap();
        assert!(!schema.fields[0].is_nullable());
        assert!(!schema.fields[1].is_nullable());
    }

    #[test]
    fn test_min_record_size() {
        let root = file_node(
            "1.12.1",
            vec![
                field("primary", "id"),
                field("byte", "flag"),
                field("float", "scale"),
                field("localized_string", "name"),
            ],
        );
        let schema = Schema::from_tree(&[root]).unwrap();
        assert_eq!(schema.min_record_size(), 4 + 1 + 4 + 9 * 4);
    }

    #[test]
    fn test_field_kind_names_round_trip() {
        for name in ["byte", "primary", "int", "uint", "float", "string", "localized_string"] {
            let kind = FieldKind::from_node_name(name).unwrap();
            assert_eq!(kind.node_name(), name);
        }
        assert!(FieldKind::from_node_name("bool").is_none());
    }
}
