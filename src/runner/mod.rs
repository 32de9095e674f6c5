//! CLI execution and dispatch logic.
//!
//! This module keeps `main` minimal: it runs header-mode and module-mode
//! generation as requested by the [`Cli`] and writes each graph into its
//! source directory.

mod error;
mod file_io;

pub use error::RunnerError;
pub use file_io::write_ninja_file;

use crate::cli::Cli;
use crate::headers;
use crate::ir::BuildGraph;
use crate::modules::{self, ModuleOptions};
use anyhow::{Context, Result};
use camino::Utf8Path;
use tracing::{debug, warn};

/// File name of the generated Ninja file inside each source directory.
pub const BUILD_FILE_NAME: &str = "build.ninja";

/// Execute the generation requested by `cli`.
///
/// Header mode runs before module mode. When both point at the same
/// directory the module-mode file replaces the header-mode one.
///
/// # Errors
///
/// Returns an error if a source directory or file cannot be read, if
/// validation was requested and fails, or if a Ninja file cannot be written.
pub fn run(cli: &Cli) -> Result<()> {
    if cli.headers.is_none() && cli.modules.is_none() {
        warn!("neither --headers nor --modules given; nothing to generate");
        return Ok(());
    }

    if let Some(dir) = &cli.headers {
        let graph = headers::create_headers(dir, &cli.compiler)
            .with_context(|| format!("generating header-mode build for {dir}"))?;
        emit(dir, &graph)?;
    }

    if let Some(dir) = &cli.modules {
        let options = ModuleOptions {
            all_artifacts: cli.all_artifacts,
            validate: cli.validate,
        };
        let graph = modules::create_modules_with(dir, &cli.compiler, options)
            .with_context(|| format!("generating module-mode build for {dir}"))?;
        emit(dir, &graph)?;
    }
    Ok(())
}

/// Write `graph` to the build file inside `dir`.
fn emit(dir: &Utf8Path, graph: &BuildGraph) -> Result<()> {
    if tracing::enabled!(tracing::Level::DEBUG) {
        let json = serde_json::to_string_pretty(graph).context("serialising build graph")?;
        debug!("Build graph:\n{json}");
    }
    let path = dir.join(BUILD_FILE_NAME);
    write_ninja_file(&path, graph).with_context(|| format!("writing {path}"))?;
    Ok(())
}
