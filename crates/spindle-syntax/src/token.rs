//! The flat token stream consumed by the comment scanner.
//!
//! Only the tokens that matter for scope tracking and command discovery are
//! produced: scope braces and comments. Braces inside string or character
//! literals never surface because Tree-sitter folds them into the literal.

use std::ops::Range;

use crate::language::SupportedLanguage;
use crate::position::SourcePosition;

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A brace that opens a lexical scope.
    BraceOpen,
    /// A brace that closes a lexical scope.
    BraceClose,
    /// A line or block comment.
    Comment,
    /// End of input; always the last token of a stream.
    EndOfFile,
}

/// A single token with its location and literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    span: Range<usize>,
    position: SourcePosition,
    literal: String,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(
        kind: TokenKind,
        span: Range<usize>,
        position: SourcePosition,
        literal: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            span,
            position,
            literal: literal.into(),
        }
    }

    /// Token category.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Byte range covered by the token.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Where the token starts.
    #[must_use]
    pub const fn position(&self) -> SourcePosition {
        self.position
    }

    /// Source text of the token. Line comments exclude their line break.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }
}

/// Iterator over the tokens of one parsed file.
#[derive(Debug)]
pub struct Tokens {
    inner: std::vec::IntoIter<Token>,
}

impl Iterator for Tokens {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Tokens {}

/// Walks the tree in document order and collects scanner tokens.
pub(crate) fn collect(
    root: tree_sitter::Node<'_>,
    source: &str,
    language: SupportedLanguage,
) -> Tokens {
    let mut tokens = Vec::new();
    let mut cursor = root.walk();

    'walk: loop {
        let node = cursor.node();
        if visit(node, source, language, &mut tokens) && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                continue 'walk;
            }
            if !cursor.goto_parent() {
                break 'walk;
            }
        }
    }

    let end = end_of(source);
    tokens.push(Token::new(
        TokenKind::EndOfFile,
        source.len()..source.len(),
        end,
        "",
    ));

    Tokens {
        inner: tokens.into_iter(),
    }
}

/// Records `node` if it is a token of interest and reports whether its
/// children still need visiting.
fn visit(
    node: tree_sitter::Node<'_>,
    source: &str,
    language: SupportedLanguage,
    tokens: &mut Vec<Token>,
) -> bool {
    let kind = node.kind();
    if language.is_comment_kind(kind) {
        tokens.push(comment_token(node, source));
        return false;
    }
    if node.child_count() > 0 {
        return true;
    }

    let brace = if language.is_scope_open_kind(kind) {
        TokenKind::BraceOpen
    } else if language.is_scope_close_kind(kind) {
        TokenKind::BraceClose
    } else {
        return false;
    };
    let span = node.byte_range();
    let literal = source.get(span.clone()).unwrap_or_default();
    tokens.push(Token::new(
        brace,
        span.clone(),
        SourcePosition::from_point(span.start, node.start_position()),
        literal,
    ));
    false
}

/// Position just past the last byte; the root node may stop short of
/// trailing whitespace.
fn end_of(source: &str) -> SourcePosition {
    let row = source.bytes().filter(|byte| *byte == b'\n').count();
    let column = source
        .rfind('\n')
        .map_or(source.len(), |newline| source.len() - newline - 1);
    SourcePosition::from_point(source.len(), tree_sitter::Point { row, column })
}

fn comment_token(node: tree_sitter::Node<'_>, source: &str) -> Token {
    let mut span = node.byte_range();
    let mut literal = source.get(span.clone()).unwrap_or_default();
    if literal.starts_with("//") {
        // Some grammar versions fold the terminating newline into the node.
        let trimmed = literal.trim_end_matches(['\n', '\r']);
        span.end = span.start.saturating_add(trimmed.len());
        literal = trimmed;
    }
    Token::new(
        TokenKind::Comment,
        span.clone(),
        SourcePosition::from_point(span.start, node.start_position()),
        literal,
    )
}
