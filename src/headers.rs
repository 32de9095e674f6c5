//! Header-mode generation.
//!
//! Every source file is compiled on its own into an object file with a single
//! shared rule. There are no module flags and no dependencies between edges.

use camino::Utf8Path;
use tracing::debug;

use crate::ir::BuildGraph;
use crate::sources::{self, SOURCE_EXTENSION, SourceError};

/// Name of the rule compiling a source file to an object file.
pub const COMPILE_RULE: &str = "cc";

/// Build the header-mode graph for every source file under `dir`.
///
/// `compiler` is inserted verbatim at the start of the rule command. The
/// graph is returned unwritten.
///
/// # Errors
///
/// Returns [`SourceError`] when the directory cannot be listed.
pub fn create_headers(dir: &Utf8Path, compiler: &str) -> Result<BuildGraph, SourceError> {
    let names = sources::find_module_names(dir)?;
    debug!(dir = %dir, count = names.len(), "generating header-mode graph");

    let mut graph = BuildGraph::default();
    graph.add_rule(COMPILE_RULE, format!("{compiler} -c -O0 $in -o $out"));
    for name in &names {
        graph.add_build_edge(
            COMPILE_RULE,
            format!("{name}.{SOURCE_EXTENSION}"),
            format!("{name}.o"),
            Vec::<String>::new(),
        );
    }
    Ok(graph)
}
