//! CLI entrypoint for Spindle.
//!
//! The binary delegates to [`spindle_cli::run`], which loads configuration,
//! discovers source files, runs their command comments, and prints or writes
//! the rewritten results.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    spindle_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
