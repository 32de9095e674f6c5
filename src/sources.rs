//! Source discovery.
//!
//! Both generators operate on a single flat directory. Every regular file
//! directly inside it with the [`SOURCE_EXTENSION`] is a translation unit, and
//! its stem is the module name used for artifacts and import matching.

use camino::{Utf8Path, Utf8PathBuf};
use glob::MatchOptions;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Extension of the source files picked up by discovery.
pub const SOURCE_EXTENSION: &str = "cpp";

/// Errors raised while listing a source directory.
#[derive(Debug, Error, Diagnostic)]
pub enum SourceError {
    /// The source root does not exist or is not a directory.
    #[error("source directory '{dir}' does not exist or is not a directory")]
    #[diagnostic(code(ninjagen::sources::not_a_directory))]
    NotADirectory {
        /// The directory that was requested.
        dir: Utf8PathBuf,
    },
    /// The directory could not be turned into a glob pattern.
    #[error("invalid source pattern '{pattern}'")]
    #[diagnostic(code(ninjagen::sources::pattern))]
    Pattern {
        /// Pattern built from the directory.
        pattern: String,
        /// Underlying glob error.
        #[source]
        source: glob::PatternError,
    },
    /// An entry could not be read while walking the directory.
    #[error("failed to read an entry of '{dir}'")]
    #[diagnostic(code(ninjagen::sources::read_entry))]
    ReadEntry {
        /// Directory being listed.
        dir: Utf8PathBuf,
        /// Underlying glob error.
        #[source]
        source: glob::GlobError,
    },
    /// A matched path is not valid UTF-8.
    #[error("source path '{}' is not valid UTF-8", .path.display())]
    #[diagnostic(code(ninjagen::sources::non_utf8))]
    NonUtf8 {
        /// The offending path.
        path: PathBuf,
    },
}

/// Path of the source file backing `module` inside `dir`.
#[must_use]
pub fn source_path(dir: &Utf8Path, module: &str) -> Utf8PathBuf {
    dir.join(format!("{module}.{SOURCE_EXTENSION}"))
}

/// List the module names of every source file directly under `dir`.
///
/// Entries come back in the order the `glob` crate yields them, which is
/// sorted by path, so repeated runs over an unchanged directory agree.
/// Hidden files (leading `.`) and directories whose names happen to end in
/// the source extension are skipped.
///
/// # Errors
///
/// Returns [`SourceError`] when `dir` is not a directory, an entry cannot be
/// read, or a matched path is not UTF-8.
pub fn find_module_names(dir: &Utf8Path) -> Result<Vec<String>, SourceError> {
    if !dir.is_dir() {
        return Err(SourceError::NotADirectory {
            dir: dir.to_owned(),
        });
    }
    let pattern = format!(
        "{}/*.{SOURCE_EXTENSION}",
        glob::Pattern::escape(dir.as_str())
    );
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let paths = glob::glob_with(&pattern, options).map_err(|source| SourceError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in paths {
        let path = entry.map_err(|source| SourceError::ReadEntry {
            dir: dir.to_owned(),
            source,
        })?;
        let utf8 = Utf8PathBuf::from_path_buf(path).map_err(|path| SourceError::NonUtf8 { path })?;
        if !utf8.is_file() {
            debug!(path = %utf8, "skipping non-file match");
            continue;
        }
        if let Some(stem) = utf8.file_stem() {
            debug!(path = %utf8, module = stem, "discovered source");
            names.push(stem.to_owned());
        }
    }
    Ok(names)
}
