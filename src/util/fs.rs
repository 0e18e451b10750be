//! Filesystem helpers for the CLI.
//!
//! Reading inputs, writing SQL output with parent-directory creation, and
//! [`find_schema_pairs`] to match schema documents with their DBC files for
//! the `batch` subcommand.

use std::path::{Path, PathBuf};

use crate::DbcError;

/// A schema document and the DBC file sharing its stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaPair {
    /// Table stem, e.g. `ChrClasses`.
    pub name: String,
    pub schema: PathBuf,
    pub dbc: PathBuf,
}

/// Read a whole file into memory.
pub fn read_file(path: &Path) -> Result<Vec<u8>, DbcError> {
    std::fs::read(path).map_err(|e| DbcError::Io(format!("Cannot open {}: {}", path.display(), e)))
}

/// Write `contents` to `path`, creating missing parent directories.
pub fn write_output(path: &Path, contents: &str) -> Result<(), DbcError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            DbcError::Io(format!("Cannot create directory {}: {}", parent.display(), e))
        })?;
    }
    std::fs::write(path, contents)
        .map_err(|e| DbcError::Io(format!("Cannot write {}: {}", path.display(), e)))
}

/// Pair every `<name>.xml` in `schema_dir` with `<name>.dbc` in `dbc_dir`.
///
/// Schemas without a DBC counterpart are skipped. Extension matching is
/// case-insensitive. Results are sorted by name.
pub fn find_schema_pairs(schema_dir: &Path, dbc_dir: &Path) -> Result<Vec<SchemaPair>, DbcError> {
    let dbc_files = list_files(dbc_dir, "dbc")?;
    let mut pairs = Vec::new();

    for schema in list_files(schema_dir, "xml")? {
        let Some(name) = file_stem(&schema) else {
            continue;
        };
        if let Some(dbc) = dbc_files
            .iter()
            .find(|p| file_stem(p).as_deref() == Some(name.as_str()))
        {
            pairs.push(SchemaPair {
                name,
                schema,
                dbc: dbc.clone(),
            });
        }
    }

    pairs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(pairs)
}

fn list_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, DbcError> {
    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir)
        .map_err(|e| DbcError::Io(format!("Cannot read directory {}: {}", dir.display(), e)))?;

    for entry in entries {
        let entry =
            entry.map_err(|e| DbcError::Io(format!("Cannot read directory entry: {}", e)))?;
        let path = entry.path();
        if path.is_file() && has_matching_extension(&path, extension) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn has_matching_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}
