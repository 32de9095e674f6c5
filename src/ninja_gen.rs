//! Ninja file generator.
//!
//! This module converts a [`crate::ir::BuildGraph`] into the textual
//! representation expected by the Ninja build system. Rules are written
//! first, each followed by a blank line, then one line per build edge.
//! Nothing is reordered, so equal graphs always produce identical text.

use crate::ir::{BuildEdge, BuildGraph, Rule};
use camino::Utf8PathBuf;
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

/// Generate a Ninja build file as a string.
///
/// # Examples
///
/// ```
/// use ninjagen::ir::BuildGraph;
/// use ninjagen::ninja_gen::generate;
///
/// let mut graph = BuildGraph::default();
/// graph.add_rule("cc", "c++ -c $in -o $out");
/// graph.add_build_edge("cc", "b.cpp", "b.o", ["a.pcm"]);
/// assert_eq!(
///     generate(&graph),
///     "rule cc\n  command = c++ -c $in -o $out\n\nbuild b.o: cc b.cpp | a.pcm\n",
/// );
/// ```
#[must_use]
pub fn generate(graph: &BuildGraph) -> String {
    DisplayGraph(graph).to_string()
}

/// Convert a slice of paths into a space-separated string.
fn join(paths: &[Utf8PathBuf]) -> String {
    paths.iter().join(" ")
}

struct DisplayGraph<'a>(&'a BuildGraph);

impl Display for DisplayGraph<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for rule in &self.0.rules {
            write!(f, "{}", DisplayRule(rule))?;
        }
        for edge in &self.0.edges {
            write!(f, "{}", DisplayEdge(edge))?;
        }
        Ok(())
    }
}

/// Wrapper struct to display a rule declaration.
struct DisplayRule<'a>(&'a Rule);

impl Display for DisplayRule<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "rule {}", self.0.name)?;
        writeln!(f, "  command = {}", self.0.command)?;
        writeln!(f)
    }
}

/// Wrapper struct to display a build edge.
struct DisplayEdge<'a>(&'a BuildEdge);

impl Display for DisplayEdge<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let edge = self.0;
        write!(f, "build {}: {} {}", edge.output, edge.rule, edge.input)?;
        // A single pipe introduces implicit dependencies: required before the
        // edge runs, never substituted into `$in`.
        if !edge.order_deps.is_empty() {
            write!(f, " | {}", join(&edge.order_deps))?;
        }
        writeln!(f)
    }
}
