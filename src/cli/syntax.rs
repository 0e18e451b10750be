//! CLI implementation for the `dbc2sql syntax` subcommand.
//!
//! Prints a reference for the XML schema format: the document layout, every
//! field element with its on-disk width and SQL type, the supported
//! attributes and the known client versions.

use std::io::Write;

use colored::Colorize;

use crate::cli::wprintln;
use crate::wdbc::constants::*;
use crate::wdbc::field_decode::field_width;
use crate::wdbc::locale::{self, ClientVersion};
use crate::wdbc::schema::FieldKind;
use crate::wdbc::sql::sql_type;
use crate::DbcError;

/// Options for the `dbc2sql syntax` subcommand.
pub struct Options;

pub fn execute(_opts: &Options, writer: &mut dyn Write) -> Result<(), DbcError> {
    wprintln!(writer, "{}", "Schema layout".bold())?;
    wprintln!(writer, "  <{}>", SCHEMA_ROOT)?;
    wprintln!(writer, "      <{n}>TableName</{n}>", n = SCHEMA_NAME)?;
    wprintln!(writer, "      <{v}>3.3.5a</{v}>          (optional)", v = SCHEMA_VERSION)?;
    wprintln!(writer, "      <{}>", SCHEMA_FORMAT)?;
    wprintln!(writer, "          <type attr=\"...\">column_name</type>")?;
    wprintln!(writer, "          ...")?;
    wprintln!(writer, "      </{}>", SCHEMA_FORMAT)?;
    wprintln!(writer, "  </{}>", SCHEMA_ROOT)?;
    wprintln!(writer)?;

    wprintln!(writer, "{}", "Field types".bold())?;
    wprintln!(writer, "  {:<18} {:<10} {}", "Element", "Bytes", "SQL type")?;
    for kind in FieldKind::ALL {
        let (width, ty) = match kind {
            FieldKind::LocalizedString => (
                "4 x (n+1)".to_string(),
                "TEXT per locale + INT UNSIGNED flags".to_string(),
            ),
            other => (field_width(other).to_string(), sql_type(other).into_owned()),
        };
        wprintln!(writer, "  {:<18} {:<10} {}", kind.node_name(), width, ty)?;
    }
    wprintln!(writer, "  `{}` columns form the primary key.", FieldKind::Primary)?;
    wprintln!(writer)?;

    wprintln!(writer, "{}", "Attributes".bold())?;
    wprintln!(
        writer,
        "  {:<12} Foreign key target as Table{}Column",
        ATTR_REFERS_TO,
        REFERS_TO_SEPARATOR
    )?;
    wprintln!(
        writer,
        "  {:<12} '{}'-separated values emitted as NULL (ignored on localized_string)",
        ATTR_NULL_VALUES,
        NULL_VALUES_SEPARATOR
    )?;
    wprintln!(writer)?;

    wprintln!(writer, "{}", "Client versions".bold())?;
    for version in ["1.12.1", "1.12.2", "2.4.3", "3.3.5", "3.3.5a"] {
        if let Some(client) = ClientVersion::parse(version) {
            wprintln!(
                writer,
                "  {:<8} {:<24} {} locales",
                version,
                client.to_string(),
                client.locale_count()
            )?;
        }
    }
    let codes: Vec<String> = (0..locale::locale_count("3.3.5a"))
        .map(|i| locale::locale_code(i).into_owned())
        .collect();
    wprintln!(writer, "  Locale order: {}", codes.join(" "))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_lists_all_kinds() {
        let mut out = Vec::new();
        execute(&Options, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for kind in FieldKind::ALL {
            assert!(text.contains(kind.node_name()), "missing {}", kind);
        }
        assert!(text.contains("refersTo"));
        assert!(text.contains("nullValues"));
        assert!(text.contains("INT UNSIGNED"));
        assert!(text.contains("enUS koKR"));
    }
}
