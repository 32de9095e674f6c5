//! File creation helpers for the runner.
//! Writes generated Ninja files through capability-based directory handles.

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use tracing::info;

use super::RunnerError;
use crate::ir::BuildGraph;

/// Write `graph` to `path`, truncating any existing file.
///
/// The parent directory must already exist. Nothing is cleaned up on failure,
/// so an interrupted write can leave a partial file behind.
///
/// # Errors
///
/// Returns [`RunnerError`] when the parent directory cannot be opened or the
/// file cannot be created, written, or synced.
pub fn write_ninja_file(path: &Utf8Path, graph: &BuildGraph) -> Result<(), RunnerError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| RunnerError::MissingFileName {
            path: path.to_owned(),
        })?;
    let parent = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|source| {
        RunnerError::OpenDir {
            dir: parent.to_owned(),
            source,
        }
    })?;

    let write_error = |source| RunnerError::Write {
        path: path.to_owned(),
        source,
    };
    let mut file = dir.create(file_name).map_err(write_error)?;
    graph.write_to(&mut file).map_err(write_error)?;
    file.sync_all().map_err(write_error)?;
    info!("Wrote Ninja file to {path}");
    Ok(())
}
