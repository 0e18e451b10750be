//! Shared utilities (filesystem helpers for the CLI).

#[cfg(feature = "cli")]
pub mod fs;
