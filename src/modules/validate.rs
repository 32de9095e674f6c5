//! Optional consistency checks for scanned module dependencies.
//!
//! Generation never runs these on its own: a phantom import or an import
//! cycle still yields a Ninja file, and only `ninja` notices. With
//! validation enabled both are reported before anything is written.

use std::collections::HashMap;

use itertools::Itertools;
use miette::Diagnostic;
use thiserror::Error;

use super::scan::DependencyMaps;

/// Problems found by [`validate`].
#[derive(Debug, Error, Diagnostic)]
pub enum ValidationError {
    /// Imports naming modules that have no source file.
    #[error("unresolved imports: {}", format_unresolved(.unresolved))]
    #[diagnostic(
        code(ninjagen::validate::unresolved_import),
        help("every imported name must match a source file in the same directory")
    )]
    UnresolvedImports {
        /// `(importer, imported name)` pairs in scan order.
        unresolved: Vec<(String, String)>,
    },
    /// Modules importing each other directly or transitively.
    #[error("import cycle detected: {}", .cycle.join(" -> "))]
    #[diagnostic(code(ninjagen::validate::cycle))]
    Cycle {
        /// The cycle, starting and ending with the same module.
        cycle: Vec<String>,
    },
}

fn format_unresolved(unresolved: &[(String, String)]) -> String {
    unresolved
        .iter()
        .map(|(module, dep)| format!("{module} imports {dep}"))
        .join(", ")
}

/// Check that every import resolves to a scanned module and that imports
/// form no cycle.
///
/// # Errors
///
/// Returns [`ValidationError::UnresolvedImports`] listing every unresolved
/// import, or [`ValidationError::Cycle`] with the first cycle found.
pub fn validate(maps: &DependencyMaps) -> Result<(), ValidationError> {
    let unresolved = unresolved_imports(maps);
    if !unresolved.is_empty() {
        return Err(ValidationError::UnresolvedImports { unresolved });
    }
    match find_cycle(maps) {
        Some(cycle) => Err(ValidationError::Cycle { cycle }),
        None => Ok(()),
    }
}

fn unresolved_imports(maps: &DependencyMaps) -> Vec<(String, String)> {
    maps.imports
        .iter()
        .flat_map(|(module, deps)| deps.iter().map(move |dep| (module, dep)))
        .filter(|(_, dep)| !maps.imports.contains_key(dep.as_str()))
        .map(|(module, dep)| (module.clone(), dep.clone()))
        .collect()
}

/// Tracks the visitation state of a module during cycle detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum VisitState {
    Visiting,
    Visited,
}

fn find_cycle(maps: &DependencyMaps) -> Option<Vec<String>> {
    let mut detector = CycleDetector::new(maps);
    maps.imports
        .keys()
        .find_map(|module| detector.visit(module))
}

struct CycleDetector<'a> {
    maps: &'a DependencyMaps,
    stack: Vec<&'a str>,
    states: HashMap<&'a str, VisitState>,
}

impl<'a> CycleDetector<'a> {
    fn new(maps: &'a DependencyMaps) -> Self {
        Self {
            maps,
            stack: Vec::new(),
            states: HashMap::new(),
        }
    }

    fn visit(&mut self, module: &'a str) -> Option<Vec<String>> {
        match self.states.get(module) {
            Some(VisitState::Visited) => return None,
            Some(VisitState::Visiting) => {
                let idx = self.stack.iter().position(|m| *m == module).unwrap_or(0);
                let mut cycle: Vec<String> = self
                    .stack
                    .iter()
                    .skip(idx)
                    .map(|m| (*m).to_owned())
                    .collect();
                cycle.push(module.to_owned());
                return Some(canonicalize_cycle(cycle));
            }
            None => {
                self.states.insert(module, VisitState::Visiting);
            }
        }

        self.stack.push(module);
        let maps = self.maps;
        for dep in maps.imports_of(module) {
            // Unresolved names have no outgoing edges.
            if !maps.imports.contains_key(dep) {
                continue;
            }
            if let Some(cycle) = self.visit(dep) {
                return Some(cycle);
            }
        }
        self.stack.pop();
        self.states.insert(module, VisitState::Visited);
        None
    }
}

/// Rotate a closed cycle so that its smallest module comes first.
fn canonicalize_cycle(mut cycle: Vec<String>) -> Vec<String> {
    if cycle.len() < 2 {
        return cycle;
    }
    let len = cycle.len() - 1;
    let start = cycle.iter().take(len).position_min().unwrap_or(0);
    let (prefix, suffix) = cycle.split_at_mut(len);
    prefix.rotate_left(start);
    if let (Some(first), Some(slot)) = (prefix.first().cloned(), suffix.first_mut()) {
        *slot = first;
    }
    cycle
}
