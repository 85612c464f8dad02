//! CLI argument definitions for Spindle.
//!
//! Configuration flags are consumed by `ortho_config` before these
//! arguments are parsed, so only the run mode and paths appear here.

use std::path::PathBuf;

use clap::Parser;

/// Runs shell commands embedded in source comments and splices in their
/// output.
#[derive(Parser, Debug)]
#[command(name = "spindle", version)]
pub(crate) struct Cli {
    /// Overwrites files in place instead of printing the results.
    #[arg(short, long)]
    pub(crate) write: bool,
    /// Files or directories to process. Directories are walked recursively,
    /// honouring ignore files.
    #[arg(value_name = "PATH", default_value = ".")]
    pub(crate) paths: Vec<PathBuf>,
}
