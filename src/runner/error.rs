//! Error types for the runner module.

use camino::Utf8PathBuf;
use miette::Diagnostic;
use std::io;
use thiserror::Error;

/// Errors raised while writing a generated Ninja file.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    /// The directory that should hold the Ninja file could not be opened.
    #[error("failed to open output directory '{dir}'")]
    #[diagnostic(code(ninjagen::runner::open_dir))]
    OpenDir {
        /// Directory that was requested.
        dir: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The output path has no file name component.
    #[error("output path '{path}' does not name a file")]
    #[diagnostic(code(ninjagen::runner::missing_file_name))]
    MissingFileName {
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// The Ninja file could not be created or written.
    #[error("failed to write Ninja file '{path}'")]
    #[diagnostic(code(ninjagen::runner::write))]
    Write {
        /// Destination path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
