//! Error types for the comment-rewriting pipeline.
//!
//! Severity follows the scope of the mistake: an unknown directive word is a
//! markup defect and aborts the whole run, while command, edit, and format
//! failures are confined to the file that produced them.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use spindle_syntax::{SourcePosition, SyntaxError, ValidationFailure};
use thiserror::Error;

use crate::extract::CommandRequest;

/// Errors raised while scanning a token stream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// A directive comment used a word other than `ok` or `deny`.
    #[error("{position}: unknown directive: {word}")]
    UnknownDirective {
        /// Position of the offending word.
        position: SourcePosition,
        /// The unrecognised word.
        word: String,
    },

    /// A closing brace had no matching opener.
    #[error("{position}: closing brace without a matching scope")]
    UnbalancedScope {
        /// Position of the closing brace.
        position: SourcePosition,
    },
}

impl ScanError {
    /// Creates an unknown directive error.
    #[must_use]
    pub fn unknown_directive(position: SourcePosition, word: impl Into<String>) -> Self {
        Self::UnknownDirective {
            position,
            word: word.into(),
        }
    }

    /// Creates an unbalanced scope error.
    #[must_use]
    pub const fn unbalanced_scope(position: SourcePosition) -> Self {
        Self::UnbalancedScope { position }
    }

    /// Returns true when the error must abort the entire run.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::UnknownDirective { .. })
    }
}

/// Why a single command did not produce output.
#[derive(Debug, Error)]
pub enum CommandFailure {
    /// The shell could not be started.
    #[error("failed to start shell: {0}")]
    Spawn(#[source] io::Error),

    /// The command ran but reported failure.
    #[error("{status}{}", stderr_suffix(stderr))]
    Exit {
        /// Exit status reported by the shell.
        status: ExitStatus,
        /// Trimmed standard error output.
        stderr: String,
    },

    /// The task running the command panicked or was cancelled.
    #[error("command task aborted: {0}")]
    Aborted(String),
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// A command comment that failed to execute.
#[derive(Debug, Error)]
#[error("{position}: {prompt}: {failure}")]
pub struct CommandError {
    /// Position of the originating comment.
    pub position: SourcePosition,
    /// The command text.
    pub prompt: String,
    /// Underlying cause.
    #[source]
    pub failure: CommandFailure,
}

impl CommandError {
    /// Attaches a failure to the request that produced it.
    #[must_use]
    pub fn new(request: &CommandRequest, failure: CommandFailure) -> Self {
        Self {
            position: request.position(),
            prompt: request.prompt().to_owned(),
            failure,
        }
    }
}

/// Structural defects in an edit list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    /// An edit starts after it ends.
    #[error("edit range {start}..{end} is inverted")]
    Inverted {
        /// Start offset.
        start: usize,
        /// End offset.
        end: usize,
    },

    /// An edit starts before the previous edit ends.
    #[error("edit at {start} overlaps previous edit ending at {previous_end}")]
    Overlap {
        /// Start offset of the offending edit.
        start: usize,
        /// End offset of the preceding edit.
        previous_end: usize,
    },

    /// An edit reaches past the end of the file.
    #[error("edit range {start}..{end} exceeds file length {len}")]
    OutOfBounds {
        /// Start offset.
        start: usize,
        /// End offset.
        end: usize,
        /// Length of the original buffer.
        len: usize,
    },
}

/// Failures while validating or reformatting a rewritten buffer.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The rewritten buffer is not valid UTF-8.
    #[error("rewritten source is not valid UTF-8")]
    Encoding,

    /// The rewritten buffer no longer parses.
    #[error("rewritten source has {} syntax error(s)", failures.len())]
    Invalid {
        /// Every syntax problem found.
        failures: Vec<ValidationFailure>,
    },

    /// The validator itself failed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The external formatter could not be run.
    #[error("failed to run formatter `{command}`: {source}")]
    Spawn {
        /// Formatter command line.
        command: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The external formatter reported failure.
    #[error("formatter `{command}` failed with {status}{}", stderr_suffix(stderr))]
    Command {
        /// Formatter command line.
        command: String,
        /// Exit status of the formatter.
        status: ExitStatus,
        /// Trimmed standard error output.
        stderr: String,
    },
}

/// Everything that can go wrong while processing one file.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file could not be read.
    #[error("{}: failed to read: {source}", path.display())]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The file is not valid UTF-8.
    #[error("{}: source is not valid UTF-8", path.display())]
    Decode {
        /// File path.
        path: PathBuf,
    },

    /// Tokenisation failed.
    #[error("{}: {source}", path.display())]
    Syntax {
        /// File path.
        path: PathBuf,
        /// Underlying syntax error.
        #[source]
        source: SyntaxError,
    },

    /// Scanning stopped on a malformed directive or brace.
    #[error("{}:{source}", path.display())]
    Scan {
        /// File path.
        path: PathBuf,
        /// Underlying scan error.
        #[source]
        source: ScanError,
    },

    /// One or more commands failed; no edits were applied.
    #[error("{}: {} command(s) failed", path.display(), failures.len())]
    Commands {
        /// File path.
        path: PathBuf,
        /// Failures in document order.
        failures: Vec<CommandError>,
    },

    /// The computed edits were structurally invalid.
    #[error("{}: {source}", path.display())]
    Edit {
        /// File path.
        path: PathBuf,
        /// Underlying edit error.
        #[source]
        source: EditError,
    },

    /// The rewritten file failed validation or reformatting.
    #[error("{}: {source}", path.display())]
    Format {
        /// File path.
        path: PathBuf,
        /// Underlying format error.
        #[source]
        source: FormatError,
    },

    /// The rewritten file could not be written back.
    #[error("{}: failed to write: {source}", path.display())]
    Write {
        /// File path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The task processing the file panicked.
    #[error("{}: processing aborted: {message}", path.display())]
    Aborted {
        /// File path.
        path: PathBuf,
        /// Description of the abort.
        message: String,
    },
}

impl FileError {
    /// Path of the file the error belongs to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. }
            | Self::Decode { path }
            | Self::Syntax { path, .. }
            | Self::Scan { path, .. }
            | Self::Commands { path, .. }
            | Self::Edit { path, .. }
            | Self::Format { path, .. }
            | Self::Write { path, .. }
            | Self::Aborted { path, .. } => path,
        }
    }

    /// Returns true when the error must abort the entire run.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        match self {
            Self::Scan { source, .. } => source.is_fatal(),
            _ => false,
        }
    }

    /// One diagnostic line per underlying problem.
    ///
    /// Command and validation failures expand to one line each so every
    /// offending position is reported.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<String> {
        match self {
            Self::Commands { path, failures } => failures
                .iter()
                .map(|failure| format!("{}:{failure}", path.display()))
                .collect(),
            Self::Format {
                source: FormatError::Invalid { failures },
                ..
            } => failures.iter().map(ToString::to_string).collect(),
            other => vec![other.to_string()],
        }
    }
}

/// A fatal error that stopped the whole run.
#[derive(Debug, Error)]
#[error("{}:{source}", path.display())]
pub struct RunError {
    /// File containing the offending directive.
    pub path: PathBuf,
    /// The scan error that triggered the abort.
    #[source]
    pub source: ScanError,
}
