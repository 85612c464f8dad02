//! Post-rewrite validation and optional reformatting.
//!
//! Rewriting splices arbitrary command output into block comments, which can
//! break the file (an output containing `*/`, for instance). Every rewritten
//! buffer is therefore parsed again before it is written or shown.

use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use spindle_syntax::SyntaxValidator;
use tokio::io::AsyncWriteExt;

use crate::error::FormatError;
use crate::exec::Shell;
use crate::file::SourceFile;

/// Turns a rewritten buffer into its final form.
#[async_trait]
pub trait SourceFormatter: Send + Sync {
    /// Validates and possibly reformats `rewritten`, the new contents of
    /// `file`.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] when the buffer is malformed or the
    /// formatter fails.
    async fn format(&self, file: &SourceFile, rewritten: Vec<u8>) -> Result<Vec<u8>, FormatError>;
}

/// Parses the rewritten buffer and passes it through unchanged when clean.
#[derive(Debug, Default)]
pub struct SyntaxCheckFormatter {
    validator: SyntaxValidator,
}

impl SyntaxCheckFormatter {
    /// Creates a formatter with a fresh parser cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&self, file: &SourceFile, rewritten: &[u8]) -> Result<(), FormatError> {
        let text = std::str::from_utf8(rewritten).map_err(|_| FormatError::Encoding)?;
        let failures = self.validator.validate(file.language(), file.path(), text)?;
        if failures.is_empty() {
            Ok(())
        } else {
            Err(FormatError::Invalid { failures })
        }
    }
}

#[async_trait]
impl SourceFormatter for SyntaxCheckFormatter {
    async fn format(&self, file: &SourceFile, rewritten: Vec<u8>) -> Result<Vec<u8>, FormatError> {
        self.check(file, &rewritten)?;
        Ok(rewritten)
    }
}

/// Syntax check followed by an external formatter reading stdin.
///
/// The formatter command line runs through the configured shell, for
/// example `rustfmt --emit stdout`.
#[derive(Debug)]
pub struct CommandFormatter {
    check: SyntaxCheckFormatter,
    shell: Arc<Shell>,
    command: String,
}

impl CommandFormatter {
    /// Creates a formatter that pipes through `command` using `shell`.
    #[must_use]
    pub fn new(shell: Shell, command: impl Into<String>) -> Self {
        Self {
            check: SyntaxCheckFormatter::new(),
            shell: Arc::new(shell),
            command: command.into(),
        }
    }

    /// The formatter command line.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    fn spawn_error(&self, source: std::io::Error) -> FormatError {
        FormatError::Spawn {
            command: self.command.clone(),
            source,
        }
    }
}

#[async_trait]
impl SourceFormatter for CommandFormatter {
    async fn format(&self, file: &SourceFile, rewritten: Vec<u8>) -> Result<Vec<u8>, FormatError> {
        self.check.check(file, &rewritten)?;

        let mut command = self.shell.command(&self.command);
        command.stdin(Stdio::piped());
        let mut child = command.spawn().map_err(|error| self.spawn_error(error))?;
        let Some(mut stdin) = child.stdin.take() else {
            return Err(self.spawn_error(std::io::Error::other("formatter stdin unavailable")));
        };

        // Feed stdin while collecting output so large files cannot deadlock
        // on a full pipe.
        let feed = async move {
            stdin.write_all(&rewritten).await?;
            stdin.shutdown().await
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output.map_err(|error| self.spawn_error(error))?;
        if !output.status.success() {
            return Err(FormatError::Command {
                command: self.command.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        fed.map_err(|error| self.spawn_error(error))?;
        Ok(output.stdout)
    }
}
