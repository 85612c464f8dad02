//! Comment-driven command execution and source rewriting.
//!
//! The engine scans a source file's comments for shell commands, runs the
//! ones that a scoped opt-in policy allows, and splices each command's output
//! back into the file in place of the comment that requested it.
//!
//! ```text
//! //spindle:ok
//! // % date -u +%Y
//! ```
//!
//! becomes
//!
//! ```text
//! //spindle:ok
//! /* # date -u +%Y
//! 2026
//! */
//! ```
//!
//! # Policy
//!
//! Commands are denied until a `//spindle:ok` directive allows them, and
//! `//spindle:deny` switches them off again. A directive only lasts until
//! the end of the brace-delimited scope it appears in. Any other word after
//! the `//spindle:` prefix is treated as an authoring error and stops the
//! whole run before further commands are started.
//!
//! # Stages
//!
//! - [`scan`] walks the token stream, tracking a [`PermissionStack`] and
//!   collecting [`CommandRequest`]s in document order
//! - [`Executor`] runs the requests concurrently, one task per command
//! - [`apply_edits`] splices the results into the original bytes
//! - a [`SourceFormatter`] validates (and optionally reformats) the result
//! - [`Pipeline`] ties the stages together and fans out over files

mod directive;
mod edit;
mod error;
mod exec;
mod extract;
mod file;
mod format;
mod permission;
mod pipeline;
mod scan;

pub use directive::{DIRECTIVE_PREFIX, Directive, parse_directive};
pub use edit::{Edit, apply_edits};
pub use error::{
    CommandError, CommandFailure, EditError, FileError, FormatError, RunError, ScanError,
};
pub use exec::{DEFAULT_SHELL, Executor, Shell};
pub use extract::{COMMAND_SIGIL, CommandRequest, RESULT_SIGIL, command_prompt, render_replacement};
pub use file::SourceFile;
pub use format::{CommandFormatter, SourceFormatter, SyntaxCheckFormatter};
pub use permission::{PermissionStack, RootScopeError};
pub use pipeline::{Disposition, FileOutcome, OutputMode, Pipeline, Rewrite, RunReport};
pub use scan::{Scanner, scan};

#[cfg(test)]
mod tests;
