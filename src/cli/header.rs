//! CLI implementation for the `dbc2sql header` subcommand.
//!
//! Prints the 20-byte DBC header and the derived string pool location. No
//! schema is needed, so only the magic check applies.

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use crate::cli::wprintln;
use crate::util::fs::read_file;
use crate::wdbc::header::DbcHeader;
use crate::DbcError;

/// Options for the `dbc2sql header` subcommand.
pub struct Options {
    /// Path to the DBC file.
    pub input: String,
    /// Output in JSON format.
    pub json: bool,
}

#[derive(Serialize)]
struct HeaderJson<'a> {
    file: &'a str,
    file_size: usize,
    #[serde(flatten)]
    header: DbcHeader,
    string_pool_end: u64,
}

pub fn execute(opts: &Options, writer: &mut dyn Write) -> Result<(), DbcError> {
    let data = read_file(Path::new(&opts.input))?;
    let header = DbcHeader::parse(&data)?;

    if opts.json {
        let out = HeaderJson {
            file: &opts.input,
            file_size: data.len(),
            header,
            string_pool_end: header.string_pool_end(),
        };
        let json = serde_json::to_string_pretty(&out)
            .map_err(|e| DbcError::Format(format!("JSON serialization error: {}", e)))?;
        wprintln!(writer, "{}", json)?;
        return Ok(());
    }

    wprintln!(writer, "{}", opts.input.bold())?;
    wprintln!(writer, "  Rows:               {}", header.row_count)?;
    wprintln!(writer, "  Columns:            {}", header.column_count)?;
    wprintln!(writer, "  Record size:        {}", header.record_size)?;
    wprintln!(writer, "  String pool start:  {}", header.string_pool_offset)?;
    wprintln!(writer, "  String pool length: {}", header.string_pool_length)?;

    let expected = header.string_pool_end();
    let actual = data.len() as u64;
    if actual < expected {
        wprintln!(
            writer,
            "  {} file is {} bytes, header describes {}",
            "TRUNCATED".red(),
            actual,
            expected
        )?;
    } else if actual > expected {
        wprintln!(
            writer,
            "  {} {} trailing bytes after the string pool",
            "NOTE".yellow(),
            actual - expected
        )?;
    }

    Ok(())
}
