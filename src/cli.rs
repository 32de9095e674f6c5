//! Command line interface definition using clap.
//!
//! Every option can be given on the command line; the compiler may also come
//! from the `NINJAGEN_COMPILER` environment variable.

use camino::Utf8PathBuf;
use clap::Parser;
use serde::Serialize;

/// Environment variable consulted when `--compiler` is omitted.
pub const COMPILER_ENV: &str = "NINJAGEN_COMPILER";

const LONG_ABOUT: &str = "\
Generate Ninja build files for a flat directory of header-based or \
module-based C++ sources.

Assumptions:
  - All sources are named *.cpp and live directly in the given directory
  - Module names match file names
  - The compiler is clang with modules-ts support
  - Module dependencies are found by looking for `import <name>;` lines";

/// Generate `build.ninja` files for header-based or module-based sources.
#[derive(Debug, Clone, Parser, Serialize)]
#[command(author, version, about, long_about = LONG_ABOUT)]
pub struct Cli {
    /// Directory of header-based sources; writes `<DIR>/build.ninja`.
    #[arg(long, value_name = "DIR")]
    pub headers: Option<Utf8PathBuf>,

    /// Directory of module-based sources; writes `<DIR>/build.ninja`.
    #[arg(long, value_name = "DIR")]
    pub modules: Option<Utf8PathBuf>,

    /// Compiler invocation inserted verbatim into every rule.
    #[arg(long, value_name = "PATH", env = COMPILER_ENV)]
    pub compiler: String,

    /// Build both the interface and the object file of every module.
    #[arg(long)]
    pub all_artifacts: bool,

    /// Reject unresolved imports and import cycles in module mode.
    #[arg(long)]
    pub validate: bool,

    /// Enable verbose diagnostic logging.
    #[arg(short, long)]
    pub verbose: bool,
}
