//! Shared helpers for integration tests.
//!
//! Integration tests under `tests/` compile as independent crates. This module
//! is included via `mod common;` in individual test files to share the
//! scratch source directory helper.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::fs;
use tempfile::TempDir;

/// Create a temporary directory holding `sources` as `(file name, text)`
/// pairs.
///
/// Returns the guard keeping the directory alive and its UTF-8 path.
pub fn source_dir(sources: &[(&str, &str)]) -> Result<(TempDir, Utf8PathBuf)> {
    let temp = tempfile::tempdir().context("create temp source dir")?;
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
        .map_err(|path| anyhow::anyhow!("non-UTF-8 temp dir {}", path.display()))?;
    for (name, text) in sources {
        let path = root.join(name);
        fs::write(&path, text).with_context(|| format!("write {path}"))?;
    }
    Ok((temp, root))
}
