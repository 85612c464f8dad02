//! Tree-sitter powered lexical front end for the Spindle toolchain.
//!
//! This crate turns source text into the flat token stream consumed by the
//! comment scanner and checks rewritten files for syntax errors:
//!
//! - **Tokenisation** via [`ParseResult::tokens`], which yields braces and
//!   comments in document order followed by a single end-of-file token
//! - **Syntactic validation** via [`SyntaxValidator`], which reports every
//!   error or missing node in a rewritten buffer
//!
//! # Supported Languages
//!
//! - Rust (`.rs`)
//! - TypeScript (`.ts`, `.mts`, `.cts`)
//! - TSX (`.tsx`)
//!
//! All share the C-style comment syntax (`//` and `/* */`) and brace-delimited
//! scopes that the scanner relies on.
//!
//! # Example: Tokenising
//!
//! ```
//! use spindle_syntax::{Parser, SupportedLanguage, TokenKind};
//!
//! let mut parser = Parser::new(SupportedLanguage::Rust)?;
//! let parsed = parser.parse("fn main() { // % echo hi\n}")?;
//! let kinds: Vec<TokenKind> = parsed.tokens().map(|token| token.kind()).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::BraceOpen,
//!         TokenKind::Comment,
//!         TokenKind::BraceClose,
//!         TokenKind::EndOfFile,
//!     ]
//! );
//! # Ok::<(), spindle_syntax::SyntaxError>(())
//! ```

mod error;
mod language;
mod parser;
mod position;
mod token;
mod validator;

pub use error::SyntaxError;
pub use language::SupportedLanguage;
pub use parser::{ParseResult, Parser, SyntaxErrorInfo};
pub use position::SourcePosition;
pub use token::{Token, TokenKind, Tokens};
pub use validator::{SyntaxValidator, ValidationFailure};

#[cfg(test)]
mod tests;
