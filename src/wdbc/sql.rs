//! SQL rendering for decoded DBC tables.
//!
//! [`emit`] produces three statements in order:
//!
//! ```sql
//! DROP TABLE IF EXISTS `ChrClasses`;
//! CREATE TABLE `ChrClasses` (
//!     `id` INT UNSIGNED NOT NULL,
//!     `power_type` INT UNSIGNED NULL,
//!     `name_enUS` TEXT NOT NULL,
//!     ...
//!     `name_flags` INT UNSIGNED NOT NULL,
//!     PRIMARY KEY(`id`)
//! );
//!
//! INSERT INTO `ChrClasses` VALUES
//! ( '1', NULL, 'Warrior', ..., '16712190' ),
//! ( '2', '0', 'Paladin', ..., '16712190' );
//! ```
//!
//! Identifiers are backtick-quoted; string values were escaped when they were
//! read from the string pool. The emitter assumes the reader validated the
//! table and never fails: a column whose kind has no single SQL type renders
//! an `UNSUPPORTED <kind>` placeholder so the output stays inspectable.

use std::borrow::Cow;

use crate::wdbc::field_decode::{DecodedValue, FieldValue};
use crate::wdbc::locale;
use crate::wdbc::schema::FieldKind;
use crate::wdbc::table::{Column, ForeignKey, Table};

const INDENT: &str = "    ";

/// Render the complete SQL script for `table`.
///
/// Tables without rows get no `INSERT` statement.
pub fn emit(table: &Table) -> String {
    let mut sql = generate_ddl(table);
    if table.row_count() > 0 {
        sql.push('\n');
        sql.push_str(&generate_insert(table));
    }
    sql
}

/// Generate the `DROP TABLE` and `CREATE TABLE` statements.
pub fn generate_ddl(table: &Table) -> String {
    let name = quote_ident(table.name());
    let mut ddl = format!("DROP TABLE IF EXISTS {};\n", name);
    ddl.push_str(&format!("CREATE TABLE {} (\n", name));

    let mut defs: Vec<String> = Vec::new();
    for col in table.columns() {
        defs.extend(format_column_ddl(col));
    }
    if !table.primary_keys().is_empty() {
        defs.push(format_primary_key_ddl(table.primary_keys()));
    }
    defs.extend(table.foreign_keys().iter().map(format_fk_ddl));

    ddl.push_str(&defs.join(",\n"));
    ddl.push_str("\n);\n");
    ddl
}

/// Generate the `INSERT INTO ... VALUES` statement, one tuple per row.
pub fn generate_insert(table: &Table) -> String {
    let tuples: Vec<String> = table
        .rows()
        .iter()
        .map(|row| {
            let values: Vec<String> = row.iter().map(render_value).collect();
            format!("( {} )", values.join(", "))
        })
        .collect();

    format!(
        "INSERT INTO {} VALUES\n{};\n",
        quote_ident(table.name()),
        tuples.join(",\n")
    )
}

/// SQL type for a single-column kind.
///
/// `localized_string` spans several columns and has no single SQL type.
pub fn sql_type(kind: FieldKind) -> Cow<'static, str> {
    match kind {
        FieldKind::Byte => Cow::Borrowed("TINYINT"),
        FieldKind::UInt | FieldKind::Primary => Cow::Borrowed("INT UNSIGNED"),
        FieldKind::Int => Cow::Borrowed("INT"),
        FieldKind::String => Cow::Borrowed("TEXT"),
        FieldKind::Float => Cow::Borrowed("FLOAT"),
        other => Cow::Owned(format!("UNSUPPORTED {}", other)),
    }
}

/// Render one value: `NULL`, a single quoted literal, or one quoted literal
/// per localized slot.
pub fn render_value(value: &DecodedValue) -> String {
    if value.is_null {
        return "NULL".to_string();
    }
    match &value.value {
        FieldValue::Localized(l) => l.to_string(),
        other => format!("'{}'", other),
    }
}

/// Backtick-quote an identifier, doubling embedded backticks.
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Column definition lines for one column. Localized columns expand to one
/// `TEXT` column per locale plus a flags column.
fn format_column_ddl(col: &Column) -> Vec<String> {
    if col.kind == FieldKind::LocalizedString {
        let mut lines: Vec<String> = (0..col.locale_count)
            .map(|i| {
                format!(
                    "{}{} TEXT NOT NULL",
                    INDENT,
                    quote_ident(&format!("{}_{}", col.name, locale::locale_code(i)))
                )
            })
            .collect();
        lines.push(format!(
            "{}{} INT UNSIGNED NOT NULL",
            INDENT,
            quote_ident(&format!("{}_flags", col.name))
        ));
        return lines;
    }

    vec![format!(
        "{}{} {} {}",
        INDENT,
        quote_ident(&col.name),
        sql_type(col.kind),
        if col.nullable { "NULL" } else { "NOT NULL" }
    )]
}

fn format_primary_key_ddl(keys: &[String]) -> String {
    let cols: Vec<String> = keys.iter().map(|k| quote_ident(k)).collect();
    format!("{}PRIMARY KEY({})", INDENT, cols.join(", "))
}

fn format_fk_ddl(fk: &ForeignKey) -> String {
    format!(
        "{i}FOREIGN KEY ({})\n{i}  REFERENCES {}({})\n{i}  ON UPDATE CASCADE\n{i}  ON DELETE CASCADE",
        quote_ident(&fk.column),
        quote_ident(&fk.table),
        quote_ident(&fk.foreign_column),
        i = INDENT
    )
}
