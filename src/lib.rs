//! ninjagen core library.
//!
//! Builds Ninja files for a flat directory of C++ sources, either compiling
//! each file on its own ([`headers`]) or ordering module interface builds
//! ahead of the sources importing them ([`modules`]).

pub mod cli;
pub mod headers;
pub mod ir;
pub mod modules;
pub mod ninja_gen;
pub mod runner;
pub mod sources;
