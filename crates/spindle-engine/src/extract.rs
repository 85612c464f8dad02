//! Recognition of command-bearing comments.
//!
//! A command comment is `// % <command>` or `/* % <command> ... */`: the
//! comment marker, at most one space, the `%` sigil, one space, and the
//! command text up to the end of the first line. Rewritten comments start
//! with the `#` result sigil instead, so they are never run again.

use std::ops::Range;

use spindle_syntax::SourcePosition;

/// Sigil marking a comment whose first line should be executed.
pub const COMMAND_SIGIL: char = '%';

/// Sigil marking a comment that holds a command's captured output.
pub const RESULT_SIGIL: char = '#';

/// A command discovered in an allowed scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    position: SourcePosition,
    span: Range<usize>,
    prompt: String,
}

impl CommandRequest {
    /// Creates a request covering the whole comment at `span`.
    #[must_use]
    pub fn new(position: SourcePosition, span: Range<usize>, prompt: impl Into<String>) -> Self {
        Self {
            position,
            span,
            prompt: prompt.into(),
        }
    }

    /// Where the comment starts.
    #[must_use]
    pub const fn position(&self) -> SourcePosition {
        self.position
    }

    /// Byte range of the entire comment, replaced on rewrite.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// The command text handed to the shell.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Extracts the command from a comment literal, if it carries one.
#[must_use]
pub fn command_prompt(literal: &str) -> Option<&str> {
    let block = literal.starts_with("/*");
    if !block && !literal.starts_with("//") {
        return None;
    }
    let body = literal.get(2..)?;
    let body = body.strip_prefix(' ').unwrap_or(body);
    let rest = body.strip_prefix(COMMAND_SIGIL)?.strip_prefix(' ')?;

    let (first_line, more_lines) = match rest.split_once('\n') {
        Some((line, _)) => (line, true),
        None => (rest, false),
    };
    let command = if block && !more_lines {
        first_line.trim_end().strip_suffix("*/").unwrap_or(first_line)
    } else {
        first_line
    };

    let command = command.trim();
    (!command.is_empty()).then_some(command)
}

/// Builds the block comment that replaces a command comment.
///
/// The shape is `/* # <prompt>\n<output>*/`; `output` is inserted verbatim.
#[must_use]
pub fn render_replacement(prompt: &str, output: &str) -> String {
    format!("/* {RESULT_SIGIL} {prompt}\n{output}*/")
}
