//! In-comment directives that switch command execution on and off.
//!
//! A directive is a line comment of the exact form `//spindle:ok` or
//! `//spindle:deny`. The prefix is case-sensitive; any other word after it
//! is an authoring mistake that stops the run.

use std::fmt;

/// Marker that introduces a directive comment.
pub const DIRECTIVE_PREFIX: &str = "//spindle:";

/// A recognised directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// `ok`: commands may run until the end of the current scope.
    Allow,
    /// `deny`: commands are ignored until the end of the current scope.
    Deny,
}

impl Directive {
    /// Maps a directive word to its directive.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "ok" => Some(Self::Allow),
            "deny" => Some(Self::Deny),
            _ => None,
        }
    }

    /// The word that spells this directive.
    #[must_use]
    pub const fn word(self) -> &'static str {
        match self {
            Self::Allow => "ok",
            Self::Deny => "deny",
        }
    }

    /// Permission value the directive assigns to its scope.
    #[must_use]
    pub const fn permits(self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// Classifies a comment literal.
///
/// Returns `None` when the comment is not a directive, `Some(Ok(_))` for a
/// recognised directive, and `Some(Err(word))` with the offending word when
/// the prefix is followed by anything else.
#[must_use]
pub fn parse_directive(literal: &str) -> Option<Result<Directive, &str>> {
    let word = literal.strip_prefix(DIRECTIVE_PREFIX)?.trim_end();
    Some(Directive::from_word(word).ok_or(word))
}
