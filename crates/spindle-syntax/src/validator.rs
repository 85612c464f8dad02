//! Syntactic validation of rewritten files.
//!
//! Spliced command output can break a file, for example when the output
//! itself contains `*/`. [`SyntaxValidator`] re-parses the rewritten buffer
//! and reports every ERROR or MISSING node before anything touches disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::parser::Parser;
use crate::position::SourcePosition;

/// Tree-sitter backed syntax checker.
///
/// Safe to share between tasks; parsers are created lazily per language and
/// cached behind a mutex.
pub struct SyntaxValidator {
    parsers: Mutex<HashMap<SupportedLanguage, Parser>>,
}

impl SyntaxValidator {
    /// Creates a validator with an empty parser cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: Mutex::new(HashMap::new()),
        }
    }

    /// Validates `content` as source in `language`.
    ///
    /// Returns the failures found; an empty list means the content parsed
    /// cleanly. `path` is only used to label the failures.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser cannot be initialised, Tree-sitter
    /// produces no tree, or the parser cache lock is poisoned.
    pub fn validate(
        &self,
        language: SupportedLanguage,
        path: &Path,
        content: &str,
    ) -> Result<Vec<ValidationFailure>, SyntaxError> {
        let mut parsers = self
            .parsers
            .lock()
            .map_err(|_| SyntaxError::internal_error("parser cache lock poisoned"))?;

        let parser = match parsers.entry(language) {
            std::collections::hash_map::Entry::Occupied(entry) => entry.into_mut(),
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(Parser::new(language)?)
            }
        };

        let result = parser.parse(content)?;
        let failures = result
            .errors()
            .into_iter()
            .map(|error| ValidationFailure {
                path: path.to_path_buf(),
                position: error.position,
                message: error.message,
            })
            .collect();
        Ok(failures)
    }
}

impl Default for SyntaxValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SyntaxValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxValidator")
            .field("languages", &SupportedLanguage::all())
            .finish_non_exhaustive()
    }
}

/// A single syntax problem in a validated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Path to the affected file.
    pub path: PathBuf,
    /// Where the problem starts.
    pub position: SourcePosition,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.path.display(),
            self.position,
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn accepts_rewritten_rust() {
        let validator = SyntaxValidator::new();
        let content = "fn main() {\n    /* # echo ok\nok\n*/\n}\n";

        let failures = validator
            .validate(SupportedLanguage::Rust, Path::new("main.rs"), content)
            .expect("validate");
        assert!(failures.is_empty(), "unexpected failures: {failures:?}");
    }

    #[test]
    fn output_closing_the_comment_early_is_rejected() {
        let validator = SyntaxValidator::new();
        let content = "fn main() {\n    /* # echo '*/'\n*/\n*/\n}\n";

        let failures = validator
            .validate(SupportedLanguage::Rust, Path::new("main.rs"), content)
            .expect("validate");
        assert!(!failures.is_empty());
    }

    #[test]
    fn failures_render_with_path_and_position() {
        let validator = SyntaxValidator::new();
        let failures = validator
            .validate(SupportedLanguage::Rust, Path::new("broken.rs"), "fn broken() {")
            .expect("validate");

        let first = failures.first().expect("failure");
        let rendered = first.to_string();
        assert!(rendered.starts_with("broken.rs:1:"), "rendered: {rendered}");
    }

    #[rstest]
    #[case("const x: unknown = 1;\nconst n = <number>x;\n")]
    #[case("const id = <T>(x: T) => x;\n")]
    fn plain_typescript_accepts_angle_bracket_syntax(#[case] content: &str) {
        let validator = SyntaxValidator::new();
        let failures = validator
            .validate(SupportedLanguage::TypeScript, Path::new("a.ts"), content)
            .expect("validate");
        assert!(failures.is_empty(), "unexpected failures: {failures:?}");
    }

    #[test]
    fn tsx_treats_angle_brackets_as_jsx() {
        let validator = SyntaxValidator::new();
        let failures = validator
            .validate(
                SupportedLanguage::Tsx,
                Path::new("a.tsx"),
                "const x: unknown = 1;\nconst n = <number>x;\n",
            )
            .expect("validate");
        assert!(!failures.is_empty());
    }

    #[test]
    fn reuses_cached_parsers() {
        let validator = SyntaxValidator::new();
        for source in ["fn a() {}", "fn b() {}"] {
            let failures = validator
                .validate(SupportedLanguage::Rust, Path::new("lib.rs"), source)
                .expect("validate");
            assert!(failures.is_empty());
        }
    }
}
