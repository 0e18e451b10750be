//! DBC client table decoder and SQL migration toolkit.
//!
//! The `dbc-utils` crate (library name `dbc`) decodes World of Warcraft
//! client data tables (`.dbc` files) into an in-memory relational table,
//! guided by an XML schema that describes each record's layout, and renders
//! that table as MySQL-flavoured SQL (`DROP TABLE`, `CREATE TABLE` and one
//! `INSERT INTO ... VALUES` statement).
//!
//! # CLI Reference
//!
//! | Command | Purpose |
//! |---------|---------|
//! | [`dbc2sql convert`](cli::app::Commands::Convert) | Convert one `.dbc` file into a `.sql` file |
//! | [`dbc2sql batch`](cli::app::Commands::Batch) | Convert every schema/DBC pair found in two directories |
//! | [`dbc2sql header`](cli::app::Commands::Header) | Print a `.dbc` file's header without a schema |
//! | [`dbc2sql syntax`](cli::app::Commands::Syntax) | Describe the supported schema syntax |
//! | [`dbc2sql completions`](cli::app::Commands::Completions) | Generate shell completions |
//!
//! # Library API
//!
//! ```no_run
//! use dbc::wdbc::{reader, schema::Schema, sql, xml};
//!
//! let tree = xml::parse_schema_tree(&std::fs::read_to_string("ChrClasses.xml").unwrap()).unwrap();
//! let schema = Schema::from_tree(&tree).unwrap();
//! let bytes = std::fs::read("ChrClasses.dbc").unwrap();
//! let table = reader::decode(&schema, &bytes).unwrap();
//! println!("{}", sql::emit(&table));
//! ```
//!
//! ## Module overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`wdbc::header`] | Fixed 20-byte header parsing and string pool bounds |
//! | [`wdbc::schema`] | Schema tree, field kinds and field descriptors |
//! | [`wdbc::xml`] | XML schema text to schema tree |
//! | [`wdbc::locale`] | Client versions and their locale tables |
//! | [`wdbc::field_decode`] | Decoded values, fixed-width readers, string escaping |
//! | [`wdbc::reader`] | Record walking and string pool resolution |
//! | [`wdbc::table`] | The decoded table model |
//! | [`wdbc::sql`] | DDL and DML rendering |
//!
//! ## Feature flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli` | on | Builds the `dbc2sql` binary and the [`cli`] module. |

#[cfg(feature = "cli")]
pub mod cli;
pub mod util;
pub mod wdbc;

use thiserror::Error;

/// Errors returned by `dbc` operations.
#[derive(Error, Debug)]
pub enum DbcError {
    /// An I/O error occurred (file open, read, or write failure).
    #[error("I/O error: {0}")]
    Io(String),

    /// The schema tree is malformed or incomplete.
    #[error("Schema error: {0}")]
    Schema(String),

    /// The binary input does not match the expected DBC layout or schema.
    #[error("Format error: {0}")]
    Format(String),

    /// An invalid argument was supplied.
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// Some files of a multi-file run failed; each was reported as it failed.
    #[error("Batch incomplete: {0}")]
    Batch(String),
}
