//! Tree-sitter parsing wrapper.
//!
//! [`Parser`] owns a grammar-configured Tree-sitter parser; [`ParseResult`]
//! keeps the tree together with its source so tokens and error reports can
//! be produced without re-reading the file.

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::position::SourcePosition;
use crate::token::{self, Tokens};

/// A parsed source file.
///
/// Tree-sitter is error-tolerant: a result may hold a usable tree that still
/// contains ERROR or MISSING nodes. Tokenisation works on such trees;
/// validation reports them.
#[derive(Debug)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    source: String,
    language: SupportedLanguage,
}

impl ParseResult {
    /// Collects every syntax error in document order.
    #[must_use]
    pub fn errors(&self) -> Vec<SyntaxErrorInfo> {
        let mut errors = Vec::new();
        collect_error_nodes(self.tree.root_node(), &mut errors);
        errors
    }

    /// Returns the scanner's view of the file: braces and comments in
    /// document order, terminated by a single end-of-file token.
    #[must_use]
    pub fn tokens(&self) -> Tokens {
        token::collect(self.tree.root_node(), &self.source, self.language)
    }
}

/// A syntax error found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// Where the offending node starts.
    pub position: SourcePosition,
    /// Human-readable description of the error.
    pub message: String,
}

impl SyntaxErrorInfo {
    fn from_node(node: tree_sitter::Node<'_>) -> Self {
        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            String::from("syntax error")
        };
        Self {
            position: SourcePosition::from_point(node.start_byte(), node.start_position()),
            message,
        }
    }
}

/// Tree-sitter parser configured for a single language.
pub struct Parser {
    inner: tree_sitter::Parser,
    language: SupportedLanguage,
}

impl Parser {
    /// Creates a new parser for the given language.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar is ABI-incompatible with the linked
    /// Tree-sitter runtime.
    pub fn new(language: SupportedLanguage) -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&language.tree_sitter_language())
            .map_err(|e| SyntaxError::parser_init(language, e.to_string()))?;

        Ok(Self { inner, language })
    }

    /// Parses source code and returns the result.
    ///
    /// # Errors
    ///
    /// Returns an error if Tree-sitter fails to produce any tree at all.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        let tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| SyntaxError::parse(self.language, "parsing failed"))?;

        Ok(ParseResult {
            tree,
            source: source.to_owned(),
            language: self.language,
        })
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

fn collect_error_nodes(node: tree_sitter::Node<'_>, errors: &mut Vec<SyntaxErrorInfo>) {
    if node.is_error() || node.is_missing() {
        errors.push(SyntaxErrorInfo::from_node(node));
    }

    if !node.has_error() {
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_error_nodes(child, errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SupportedLanguage::Rust, "fn main() {}")]
    #[case(
        SupportedLanguage::TypeScript,
        "function hello(): string { return `hi ${name}`; }"
    )]
    fn parser_parses_valid_source(#[case] language: SupportedLanguage, #[case] source: &str) {
        let mut parser = Parser::new(language).expect("parser init");
        let result = parser.parse(source).expect("parse");

        assert!(result.errors().is_empty());
    }

    #[rstest]
    #[case(SupportedLanguage::Rust, "fn broken() {")]
    #[case(SupportedLanguage::TypeScript, "function broken( {")]
    fn parser_detects_syntax_errors(#[case] language: SupportedLanguage, #[case] source: &str) {
        let mut parser = Parser::new(language).expect("parser init");
        let result = parser.parse(source).expect("parse");

        assert!(!result.errors().is_empty());
    }

    #[test]
    fn syntax_errors_carry_one_based_positions() {
        let mut parser = Parser::new(SupportedLanguage::Rust).expect("parser init");
        let result = parser.parse("fn test() {\n    let x = \n}").expect("parse");

        let first = result.errors().into_iter().next().expect("has error");
        assert!(first.position.line() >= 1);
        assert!(first.position.column() >= 1);
    }
}
