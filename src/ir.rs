//! Intermediate Representation structures.
//!
//! This module defines the in-memory build graph shared by the header and
//! module generators. A graph is an ordered list of rules followed by an
//! ordered list of build edges; nothing is sorted or deduplicated, so the
//! serialised form mirrors the order in which the generators populated it.
//!
//! # Examples
//!
//! ```
//! use ninjagen::ir::BuildGraph;
//!
//! let mut graph = BuildGraph::default();
//! graph.add_rule("cc", "clang++ -c $in -o $out");
//! graph.add_build_edge("cc", "main.cpp", "main.o", Vec::<&str>::new());
//! assert_eq!(graph.rules.len(), 1);
//! assert_eq!(graph.edges.len(), 1);
//! ```

use camino::Utf8PathBuf;
use serde::Serialize;
use std::io::{self, Write};

use crate::ninja_gen;

/// A named command template.
///
/// `command` refers to the edge's primary input and output through Ninja's
/// `$in` and `$out` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Identifier referenced by build edges.
    pub name: String,
    /// Shell command run for every edge using this rule.
    pub command: String,
}

/// A single compilation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildEdge {
    /// Name of the [`Rule`] this edge invokes.
    pub rule: String,
    /// Primary input substituted for `$in`.
    pub input: Utf8PathBuf,
    /// Artifact substituted for `$out`.
    pub output: Utf8PathBuf,
    /// Artifacts that must exist before this edge runs. They never appear on
    /// the command line.
    pub order_deps: Vec<Utf8PathBuf>,
}

/// The complete set of rules and edges for one generated Ninja file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BuildGraph {
    /// Rules in declaration order.
    pub rules: Vec<Rule>,
    /// Build edges in declaration order.
    pub edges: Vec<BuildEdge>,
}

impl BuildGraph {
    /// Append a rule.
    ///
    /// Rule names are not checked for uniqueness; adding the same name twice
    /// yields two declarations, which Ninja rejects when it loads the file.
    pub fn add_rule(&mut self, name: impl Into<String>, command: impl Into<String>) {
        self.rules.push(Rule {
            name: name.into(),
            command: command.into(),
        });
    }

    /// Append a build edge producing `output` from `input` with `rule`.
    ///
    /// An empty `deps` collection emits no dependency list.
    pub fn add_build_edge<I, P>(
        &mut self,
        rule: impl Into<String>,
        input: impl Into<Utf8PathBuf>,
        output: impl Into<Utf8PathBuf>,
        deps: I,
    ) where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        self.edges.push(BuildEdge {
            rule: rule.into(),
            input: input.into(),
            output: output.into(),
            order_deps: deps.into_iter().map(Into::into).collect(),
        });
    }

    /// Serialise the graph into `writer`.
    ///
    /// # Errors
    ///
    /// Propagates any write or flush error from `writer`. Whatever was
    /// written before the failure stays written.
    pub fn write_to(&self, mut writer: impl Write) -> io::Result<()> {
        writer.write_all(ninja_gen::generate(self).as_bytes())?;
        writer.flush()
    }
}
