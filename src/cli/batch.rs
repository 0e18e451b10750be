//! CLI implementation for the `dbc2sql batch` subcommand.
//!
//! Converts every `<name>.xml` in the schema directory that has a matching
//! `<name>.dbc` in the input directory into `<name>.sql` under the output
//! directory. Each file is an independent conversion: a failure is reported
//! and counted, and the remaining files are still processed.

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use tracing::debug;

use crate::cli::wprintln;
use crate::util::fs::{find_schema_pairs, write_output};
use crate::DbcError;

/// Options for the `dbc2sql batch` subcommand.
pub struct Options {
    /// Directory containing XML schemas.
    pub schema_dir: String,
    /// Directory containing DBC files.
    pub input_dir: String,
    /// Directory receiving the generated SQL files.
    pub output_dir: String,
}

/// Convert all schema/DBC pairs.
///
/// Returns an error naming the failure count if any file failed, so the
/// binary exits non-zero after every file has been attempted.
pub fn execute(opts: &Options, writer: &mut dyn Write) -> Result<(), DbcError> {
    let schema_dir = Path::new(&opts.schema_dir);
    let input_dir = Path::new(&opts.input_dir);
    for (dir, label) in [(schema_dir, "Schema"), (input_dir, "Input")] {
        if !dir.is_dir() {
            return Err(DbcError::Argument(format!(
                "{} directory does not exist: {}",
                label,
                dir.display()
            )));
        }
    }

    let pairs = find_schema_pairs(schema_dir, input_dir)?;
    if pairs.is_empty() {
        wprintln!(
            writer,
            "No schema in {} has a matching DBC file in {}",
            opts.schema_dir,
            opts.input_dir
        )?;
        return Ok(());
    }

    let output_dir = Path::new(&opts.output_dir);
    let mut converted = 0usize;
    let mut failed = 0usize;

    for pair in &pairs {
        debug!(table = %pair.name, schema = %pair.schema.display(), dbc = %pair.dbc.display(), "Converting");
        let target = output_dir.join(format!("{}.sql", pair.name));
        let result = crate::cli::convert_pair(&pair.schema, &pair.dbc)
            .and_then(|(table, sql)| write_output(&target, &sql).map(|_| table));

        match result {
            Ok(table) => {
                converted += 1;
                wprintln!(
                    writer,
                    "  {:<32} {} ({} rows)",
                    pair.name,
                    "OK".green(),
                    table.row_count()
                )?;
            }
            Err(e) => {
                failed += 1;
                wprintln!(writer, "  {:<32} {} {}", pair.name, "FAILED".red(), e)?;
            }
        }
    }

    wprintln!(writer)?;
    let failed_label = if failed > 0 {
        failed.to_string().red()
    } else {
        failed.to_string().green()
    };
    wprintln!(
        writer,
        "Converted {} of {} tables, {} failed",
        converted,
        pairs.len(),
        failed_label
    )?;

    if failed > 0 {
        return Err(DbcError::Batch(format!(
            "{} of {} tables failed to convert",
            failed,
            pairs.len()
        )));
    }
    Ok(())
}
