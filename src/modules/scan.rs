//! Dependency scanning for module-mode sources.
//!
//! Sources are not parsed. A line counts as an import when, after leading
//! whitespace, it starts with the [`IMPORT_KEYWORD`] followed by whitespace
//! and ends with [`IMPORT_TERMINATOR`]; whatever sits between is taken
//! verbatim as the imported module name.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use indexmap::{IndexMap, IndexSet};
use miette::Diagnostic;
use std::io::{self, BufRead, BufReader};
use thiserror::Error;
use tracing::debug;

use crate::sources::{self, SOURCE_EXTENSION};

/// Keyword introducing an import declaration.
pub const IMPORT_KEYWORD: &str = "import";
/// Character closing an import declaration.
pub const IMPORT_TERMINATOR: char = ';';

/// Errors raised while reading module sources.
#[derive(Debug, Error, Diagnostic)]
pub enum ScanError {
    /// The source directory could not be opened.
    #[error("failed to open source directory '{dir}'")]
    #[diagnostic(code(ninjagen::scan::open_dir))]
    OpenDir {
        /// Directory being scanned.
        dir: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A source file could not be opened or read.
    #[error("failed to read source '{path}'")]
    #[diagnostic(code(ninjagen::scan::read_source))]
    ReadSource {
        /// Path of the unreadable source.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Forward and reverse import edges between modules.
///
/// `imports` holds an entry for every scanned module, empty when it imports
/// nothing. `imported_by` only holds names imported at least once, including
/// names that match no scanned module. Both preserve first-seen order and
/// collapse repeated imports.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DependencyMaps {
    /// `module -> modules it imports`.
    pub imports: IndexMap<String, IndexSet<String>>,
    /// `module -> modules importing it`.
    pub imported_by: IndexMap<String, IndexSet<String>>,
}

impl DependencyMaps {
    /// Register `module` with no imports unless it is already known.
    pub fn add_module(&mut self, module: &str) {
        self.imports.entry(module.to_owned()).or_default();
    }

    /// Record that `module` imports `dependency`.
    pub fn record(&mut self, module: &str, dependency: &str) {
        self.imports
            .entry(module.to_owned())
            .or_default()
            .insert(dependency.to_owned());
        self.imported_by
            .entry(dependency.to_owned())
            .or_default()
            .insert(module.to_owned());
    }

    /// Scan one source's text for imports declared by `module`.
    ///
    /// # Errors
    ///
    /// Propagates any read error from `reader`.
    pub fn scan_source(&mut self, module: &str, reader: impl BufRead) -> io::Result<()> {
        self.add_module(module);
        for line in reader.lines() {
            let text = line?;
            if let Some(dependency) = parse_import(&text) {
                debug!(module, dependency, "found import");
                self.record(module, dependency);
            }
        }
        Ok(())
    }

    /// Modules imported by `module`, in declaration order.
    pub fn imports_of<'a>(&'a self, module: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.imports
            .get(module)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Whether any module imports `module`.
    #[must_use]
    pub fn has_dependents(&self, module: &str) -> bool {
        self.imported_by
            .get(module)
            .is_some_and(|importers| !importers.is_empty())
    }
}

/// Extract the module name from an import declaration line.
///
/// Returns `None` for lines that are not imports.
///
/// # Examples
///
/// ```
/// use ninjagen::modules::scan::parse_import;
///
/// assert_eq!(parse_import("import a;"), Some("a"));
/// assert_eq!(parse_import("  import   b ;  "), Some("b"));
/// assert_eq!(parse_import("important = 1;"), None);
/// assert_eq!(parse_import("// import c;"), None);
/// ```
#[must_use]
pub fn parse_import(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix(IMPORT_KEYWORD)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let name = rest.trim_end().strip_suffix(IMPORT_TERMINATOR)?.trim();
    (!name.is_empty()).then_some(name)
}

/// Scan the sources of `modules` under `dir` and build their dependency
/// maps.
///
/// Import names are not checked against `modules`; unknown names are recorded
/// like any other.
///
/// # Errors
///
/// Returns [`ScanError`] when the directory or any source cannot be read.
pub fn scan_deps(dir: &Utf8Path, modules: &[String]) -> Result<DependencyMaps, ScanError> {
    let root = Dir::open_ambient_dir(dir, ambient_authority()).map_err(|source| {
        ScanError::OpenDir {
            dir: dir.to_owned(),
            source,
        }
    })?;

    let mut maps = DependencyMaps::default();
    for module in modules {
        let file_name = format!("{module}.{SOURCE_EXTENSION}");
        let read_error = |source| ScanError::ReadSource {
            path: sources::source_path(dir, module),
            source,
        };
        let file = root.open(&file_name).map_err(read_error)?;
        maps.scan_source(module, BufReader::new(file))
            .map_err(read_error)?;
    }
    Ok(maps)
}
