//! Token-driven scanning: scope tracking, directives and command discovery.

use std::path::{Path, PathBuf};

use spindle_syntax::{Token, TokenKind};
use tracing::info;

use crate::directive::{DIRECTIVE_PREFIX, parse_directive};
use crate::error::ScanError;
use crate::extract::{CommandRequest, command_prompt};
use crate::permission::PermissionStack;

/// State machine that consumes one file's tokens in order.
///
/// The scanner owns the permission stack for the file and accumulates the
/// command requests found in allowed scopes, in document order.
#[derive(Debug)]
pub struct Scanner {
    path: PathBuf,
    permissions: PermissionStack,
    requests: Vec<CommandRequest>,
}

impl Scanner {
    /// Creates a scanner for the file at `path`. Commands start out denied.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            permissions: PermissionStack::default(),
            requests: Vec::new(),
        }
    }

    /// Processes one token.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::UnknownDirective`] for a directive comment with an
    /// unrecognised word and [`ScanError::UnbalancedScope`] for a closing
    /// brace at the root scope. The scanner must not be fed further tokens
    /// after an error.
    pub fn feed(&mut self, token: &Token) -> Result<(), ScanError> {
        match token.kind() {
            TokenKind::BraceOpen => self.permissions.push(),
            TokenKind::BraceClose => self
                .permissions
                .pop()
                .map_err(|_| ScanError::unbalanced_scope(token.position()))?,
            TokenKind::Comment => self.comment(token)?,
            TokenKind::EndOfFile => {}
        }
        Ok(())
    }

    fn comment(&mut self, token: &Token) -> Result<(), ScanError> {
        let literal = token.literal();
        if let Some(parsed) = parse_directive(literal) {
            let directive = parsed.map_err(|word| {
                ScanError::unknown_directive(
                    token.position().shifted(DIRECTIVE_PREFIX.len()),
                    word,
                )
            })?;
            self.permissions.set_top(directive.permits());
            info!(
                path = %self.path.display(),
                line = token.position().line(),
                column = token.position().column(),
                directive = %directive,
                allowed = directive.permits(),
                "command permission changed"
            );
            return Ok(());
        }

        if !self.permissions.top() {
            return Ok(());
        }
        if let Some(prompt) = command_prompt(literal) {
            self.requests
                .push(CommandRequest::new(token.position(), token.span(), prompt));
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub(crate) const fn permissions(&self) -> &PermissionStack {
        &self.permissions
    }

    /// Consumes the scanner and returns the requests in document order.
    #[must_use]
    pub fn finish(self) -> Vec<CommandRequest> {
        self.requests
    }
}

/// Scans a whole token stream.
///
/// Stops at the first error; no later token is inspected.
///
/// # Errors
///
/// Propagates the first [`ScanError`] raised by [`Scanner::feed`].
pub fn scan<I>(path: &Path, tokens: I) -> Result<Vec<CommandRequest>, ScanError>
where
    I: IntoIterator<Item = Token>,
{
    let mut scanner = Scanner::new(path);
    for token in tokens {
        scanner.feed(&token)?;
    }
    Ok(scanner.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use spindle_syntax::{Parser, SourcePosition, SupportedLanguage};

    #[fixture]
    fn rust() -> Parser {
        Parser::new(SupportedLanguage::Rust).expect("rust parser")
    }

    fn prompts(parser: &mut Parser, source: &str) -> Result<Vec<String>, ScanError> {
        let parsed = parser.parse(source).expect("parse source");
        scan(Path::new("test.rs"), parsed.tokens()).map(|requests| {
            requests
                .into_iter()
                .map(|request| request.prompt().to_owned())
                .collect()
        })
    }

    #[rstest]
    fn commands_are_denied_by_default(mut rust: Parser) {
        let found = prompts(&mut rust, "// % echo ok\nfn main() {}\n").expect("scan");
        assert!(found.is_empty());
    }

    #[rstest]
    fn allowed_commands_are_queued_in_order(mut rust: Parser) {
        let source = "//spindle:ok\n// % echo one\nfn f() {\n    // % echo two\n}\n";
        let found = prompts(&mut rust, source).expect("scan");
        assert_eq!(found, ["echo one", "echo two"]);
    }

    #[rstest]
    fn nested_allow_ends_with_its_scope(mut rust: Parser) {
        let source = "fn f() {\n    //spindle:ok\n    // % echo inner\n}\n// % echo outer\n";
        let found = prompts(&mut rust, source).expect("scan");
        assert_eq!(found, ["echo inner"]);
    }

    #[rstest]
    fn nested_deny_ends_with_its_scope(mut rust: Parser) {
        let source = concat!(
            "//spindle:ok\n",
            "fn f() {\n",
            "    //spindle:deny\n",
            "    // % echo skipped\n",
            "}\n",
            "// % echo kept\n",
        );
        let found = prompts(&mut rust, source).expect("scan");
        assert_eq!(found, ["echo kept"]);
    }

    #[rstest]
    fn request_span_covers_whole_comment(mut rust: Parser) {
        let source = "//spindle:ok\n/* % date\nold output\n*/\n";
        let parsed = rust.parse(source).expect("parse");
        let requests = scan(Path::new("test.rs"), parsed.tokens()).expect("scan");
        let request = requests.first().expect("one request");
        assert_eq!(&source[request.span()], "/* % date\nold output\n*/");
        assert_eq!(request.position().line(), 2);
    }

    #[rstest]
    fn unknown_directive_reports_word_and_position(mut rust: Parser) {
        let source = "fn f() {}\n  //spindle:maybe\n";
        let error = prompts(&mut rust, source).expect_err("fatal directive");
        assert_eq!(
            error,
            ScanError::unknown_directive(SourcePosition::new(22, 2, 13), "maybe")
        );
        assert!(error.is_fatal());
    }

    #[rstest]
    fn scanning_stops_at_unknown_directive(mut rust: Parser) {
        let parsed = rust
            .parse("//spindle:maybe\n//spindle:ok\n")
            .expect("parse");
        let mut scanner = Scanner::new("test.rs");
        let mut tokens = parsed.tokens();
        let first = tokens.next().expect("first token");
        assert!(scanner.feed(&first).is_err());
        assert!(!scanner.permissions().top());
    }

    #[test]
    fn stray_close_is_unbalanced() {
        let position = SourcePosition::new(0, 1, 1);
        let tokens = [Token::new(TokenKind::BraceClose, 0..1, position, "}")];
        let error = scan(Path::new("test.rs"), tokens).expect_err("unbalanced");
        assert_eq!(error, ScanError::unbalanced_scope(position));
        assert!(!error.is_fatal());
    }

    #[test]
    fn depth_follows_braces() {
        let at = SourcePosition::new(0, 1, 1);
        let mut scanner = Scanner::new("test.rs");
        for kind in [TokenKind::BraceOpen, TokenKind::BraceOpen, TokenKind::BraceClose] {
            scanner
                .feed(&Token::new(kind, 0..1, at, ""))
                .expect("balanced");
        }
        assert_eq!(scanner.permissions().depth(), 2);
        assert_eq!(scanner.path(), Path::new("test.rs"));
    }
}
