//! CLI implementation for the `dbc2sql convert` subcommand.
//!
//! Reads an XML schema and a DBC file, decodes every record and emits the
//! `DROP TABLE` / `CREATE TABLE` / `INSERT` script. The script goes to the
//! `-o` path when given (parent directories are created), otherwise to the
//! writer.

use std::io::Write;
use std::path::Path;

use colored::Colorize;

use crate::cli::wprintln;
use crate::util::fs::write_output;
use crate::DbcError;

/// Options for the `dbc2sql convert` subcommand.
pub struct Options {
    /// Path to the DBC file.
    pub input: String,
    /// Path to the XML schema.
    pub schema: String,
    /// SQL destination; `None` writes the script to the writer.
    pub output: Option<String>,
}

pub fn execute(opts: &Options, writer: &mut dyn Write) -> Result<(), DbcError> {
    let (table, sql) = crate::cli::convert_pair(Path::new(&opts.schema), Path::new(&opts.input))?;

    match &opts.output {
        None => {
            writer
                .write_all(sql.as_bytes())
                .map_err(|e| DbcError::Io(e.to_string()))?;
        }
        Some(path) => {
            write_output(Path::new(path), &sql)?;
            wprintln!(
                writer,
                "{} `{}`: {} rows, {} columns -> {}",
                "Converted".green(),
                table.name(),
                table.row_count(),
                table.slot_count(),
                path
            )?;
        }
    }

    Ok(())
}
