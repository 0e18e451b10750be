//! CLI subcommand implementations for the `dbc2sql` binary.
//!
//! CLI argument parsing uses clap derive macros, with the top-level
//! [`app::Cli`] struct and [`app::Commands`] enum defined in [`app`] and
//! shared between `main.rs` and `build.rs` (for man page generation) via
//! `include!()`.
//!
//! Each subcommand module follows the same pattern: an `Options` struct
//! holding the parsed arguments and a
//! `pub fn execute(opts, writer) -> Result<(), DbcError>` entry point. The
//! `writer: &mut dyn Write` parameter lets tests capture the report output.
//!
//! # Subcommands
//!
//! | Command | Module | Purpose |
//! |---------|--------|---------|
//! | `dbc2sql convert` | [`convert`] | Convert one DBC file to SQL using an XML schema |
//! | `dbc2sql batch` | [`batch`] | Convert every schema/DBC pair found in two directories |
//! | `dbc2sql header` | [`header`] | Show the header of a DBC file without a schema |
//! | `dbc2sql syntax` | [`syntax`] | Describe the schema document syntax |
//! | `dbc2sql completions` | | Generate shell completions |
//!
//! The `wprintln!` macro wraps `writeln!` to convert `io::Error` into
//! `DbcError`.

pub mod app;
pub mod batch;
pub mod convert;
pub mod header;
pub mod syntax;

/// Write a line to the given writer, converting io::Error to DbcError.
macro_rules! wprintln {
    ($w:expr) => {
        writeln!($w).map_err(|e| $crate::DbcError::Io(e.to_string()))
    };
    ($w:expr, $($arg:tt)*) => {
        writeln!($w, $($arg)*).map_err(|e| $crate::DbcError::Io(e.to_string()))
    };
}

pub(crate) use wprintln;

use std::path::Path;

use crate::util::fs::read_file;
use crate::wdbc::{reader, schema::Schema, sql, table::Table, xml};
use crate::DbcError;

/// Run one schema + DBC conversion and return the decoded table with its SQL.
///
/// Shared by `convert` and `batch`. Nothing is written here, so a failing
/// file never leaves a partial output behind.
pub(crate) fn convert_pair(schema_path: &Path, dbc_path: &Path) -> Result<(Table, String), DbcError> {
    let schema_bytes = read_file(schema_path)?;
    let schema_text = String::from_utf8_lossy(&schema_bytes);
    let tree = xml::parse_schema_tree(&schema_text)?;
    let schema = Schema::from_tree(&tree)?;

    let data = read_file(dbc_path)?;
    let table = reader::decode(&schema, &data)?;
    let sql = sql::emit(&table);
    Ok((table, sql))
}
