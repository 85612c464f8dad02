//! Language detection and Tree-sitter grammar selection.
//!
//! Besides picking a grammar, [`SupportedLanguage`] knows which node kinds
//! the grammar uses for comments and scope braces, so the tokeniser can stay
//! language-agnostic.

use std::fmt;
use std::path::Path;

/// Languages whose files can be scanned for command comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SupportedLanguage {
    /// Rust source files (`.rs`).
    #[default]
    Rust,
    /// TypeScript source files (`.ts`, `.mts`, `.cts`).
    TypeScript,
    /// TypeScript with JSX (`.tsx`).
    Tsx,
}

impl SupportedLanguage {
    /// Detects the language from a file extension.
    ///
    /// Returns `None` if the extension is not recognised.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let normalised = ext.to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|language| language.extensions().contains(&normalised.as_str()))
    }

    /// Detects the language from a file path by examining its extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// File extensions (lower case, without the dot) mapped to this language.
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Rust => &["rs"],
            Self::TypeScript => &["ts", "mts", "cts"],
            Self::Tsx => &["tsx"],
        }
    }

    /// Returns the Tree-sitter language grammar for this language.
    #[must_use]
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            // JSX makes `<T>expr` ambiguous, so plain TypeScript needs its own grammar.
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Returns true when `kind` names a comment node in this grammar.
    #[must_use]
    pub fn is_comment_kind(self, kind: &str) -> bool {
        match self {
            Self::Rust => matches!(kind, "line_comment" | "block_comment"),
            Self::TypeScript | Self::Tsx => kind == "comment",
        }
    }

    /// Returns true when `kind` names a leaf that opens a lexical scope.
    ///
    /// TypeScript template substitutions open with `${` and close with a
    /// plain `}`, so both openers count.
    #[must_use]
    pub fn is_scope_open_kind(self, kind: &str) -> bool {
        match self {
            Self::Rust => kind == "{",
            Self::TypeScript | Self::Tsx => matches!(kind, "{" | "${"),
        }
    }

    /// Returns true when `kind` names a leaf that closes a lexical scope.
    #[must_use]
    pub fn is_scope_close_kind(self, kind: &str) -> bool {
        kind == "}"
    }

    /// Returns the lower-case identifier for this language.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rust => "rust",
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
        }
    }

    /// Returns all supported languages.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Rust, Self::TypeScript, Self::Tsx]
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
