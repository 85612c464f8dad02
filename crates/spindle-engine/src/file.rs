//! Loading a source file and detecting its language.

use std::path::{Path, PathBuf};

use spindle_syntax::{SupportedLanguage, SyntaxError};

use crate::error::FileError;

/// A source file read into memory.
///
/// The text is never mutated; rewriting produces a new buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    language: SupportedLanguage,
    text: String,
}

impl SourceFile {
    /// Wraps text already in memory, detecting the language from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::Syntax`] when the extension is not supported.
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Result<Self, FileError> {
        let path = path.into();
        let Some(language) = SupportedLanguage::from_path(&path) else {
            return Err(FileError::Syntax {
                source: SyntaxError::unknown_language(path.clone()),
                path,
            });
        };
        Ok(Self {
            path,
            language,
            text: text.into(),
        })
    }

    /// Reads the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::Read`] on IO failure, [`FileError::Decode`] when
    /// the bytes are not UTF-8, and [`FileError::Syntax`] for unsupported
    /// extensions.
    pub async fn read(path: impl Into<PathBuf>) -> Result<Self, FileError> {
        let path = path.into();
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(source) => return Err(FileError::Read { path, source }),
        };
        let Ok(text) = String::from_utf8(bytes) else {
            return Err(FileError::Decode { path });
        };
        Self::from_text(path, text)
    }

    /// Path the file was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Language detected from the extension.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Original file contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
