//! Module-mode generation.
//!
//! Sources declaring `import <name>;` depend on the compiled interface
//! (`<name>.pcm`) of the imported module. A module that something imports
//! gets an interface edge so dependents can consume it; a module nothing
//! imports gets an object edge. Requesting all artifacts emits both for
//! every module.

pub mod scan;
pub mod validate;

use camino::Utf8Path;
use miette::Diagnostic;
use thiserror::Error;
use tracing::debug;

use crate::ir::BuildGraph;
use crate::sources::{self, SOURCE_EXTENSION, SourceError};
use scan::{DependencyMaps, ScanError};
use validate::ValidationError;

/// Name of the rule compiling a source file to an object file.
pub const OBJECT_RULE: &str = "cc";
/// Name of the rule compiling a source file to a module interface.
pub const INTERFACE_RULE: &str = "cc-pcm";
/// Extension of compiled module interface artifacts.
pub const INTERFACE_EXTENSION: &str = "pcm";
/// Extension of object artifacts.
pub const OBJECT_EXTENSION: &str = "o";

/// Flags controlling module-mode generation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ModuleOptions {
    /// Emit both the interface and the object edge for every module.
    pub all_artifacts: bool,
    /// Reject unresolved imports and import cycles before building the graph.
    pub validate: bool,
}

/// Errors raised by module-mode generation.
#[derive(Debug, Error, Diagnostic)]
pub enum ModuleError {
    /// Listing the source directory failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Sources(#[from] SourceError),
    /// Reading a source failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Scan(#[from] ScanError),
    /// Validation rejected the scanned dependencies.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),
}

/// Interface artifact path for `module`.
#[must_use]
pub fn interface_artifact(module: &str) -> String {
    format!("{module}.{INTERFACE_EXTENSION}")
}

/// Build the module-mode graph for every source file under `dir`.
///
/// Shorthand for [`create_modules_with`] with validation disabled.
///
/// # Errors
///
/// Returns [`ModuleError`] when the directory or a source cannot be read.
pub fn create_modules(
    dir: &Utf8Path,
    compiler: &str,
    all_artifacts: bool,
) -> Result<BuildGraph, ModuleError> {
    create_modules_with(
        dir,
        compiler,
        ModuleOptions {
            all_artifacts,
            validate: false,
        },
    )
}

/// Build the module-mode graph for every source file under `dir`.
///
/// # Errors
///
/// Returns [`ModuleError`] when the directory or a source cannot be read, or
/// when validation is requested and fails.
pub fn create_modules_with(
    dir: &Utf8Path,
    compiler: &str,
    options: ModuleOptions,
) -> Result<BuildGraph, ModuleError> {
    let names = sources::find_module_names(dir)?;
    let maps = scan::scan_deps(dir, &names)?;
    if options.validate {
        validate::validate(&maps)?;
    }
    debug!(
        dir = %dir,
        modules = names.len(),
        all_artifacts = options.all_artifacts,
        "generating module-mode graph"
    );
    Ok(build_graph(compiler, &names, &maps, options.all_artifacts))
}

/// Assemble the module-mode graph from already scanned dependencies.
///
/// Edges follow the order of `names`; a module's interface edge precedes its
/// object edge.
#[must_use]
pub fn build_graph(
    compiler: &str,
    names: &[String],
    maps: &DependencyMaps,
    all_artifacts: bool,
) -> BuildGraph {
    let mut graph = BuildGraph::default();
    graph.add_rule(
        OBJECT_RULE,
        format!("{compiler} -fmodules-ts -c -O0 $in -fprebuilt-module-path=. -o $out"),
    );
    graph.add_rule(
        INTERFACE_RULE,
        format!(
            "{compiler} -fmodules-ts -c -O0 $in -fprebuilt-module-path=. \
             -Xclang -fmodules-codegen -Xclang -emit-module-interface -o $out"
        ),
    );

    for name in names {
        let deps: Vec<String> = maps.imports_of(name).map(interface_artifact).collect();
        let has_dependents = maps.has_dependents(name);
        let source = format!("{name}.{SOURCE_EXTENSION}");
        if all_artifacts || has_dependents {
            graph.add_build_edge(
                INTERFACE_RULE,
                source.as_str(),
                interface_artifact(name),
                &deps,
            );
        }
        if all_artifacts || !has_dependents {
            graph.add_build_edge(
                OBJECT_RULE,
                source.as_str(),
                format!("{name}.{OBJECT_EXTENSION}"),
                &deps,
            );
        }
    }
    graph
}
