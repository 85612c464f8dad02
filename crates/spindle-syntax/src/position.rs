//! Source positions shared by tokens, diagnostics, and validation failures.
//!
//! Tree-sitter points are zero-based. Everything user-facing in Spindle uses
//! one-based line and column numbers, with columns counted in UTF-8 bytes.

use std::fmt;

/// A location in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourcePosition {
    offset: usize,
    line: u32,
    column: u32,
}

impl SourcePosition {
    /// Creates a position from a byte offset and one-based coordinates.
    #[must_use]
    pub const fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Builds a position from a byte offset and a Tree-sitter point.
    #[must_use]
    pub fn from_point(offset: usize, point: tree_sitter::Point) -> Self {
        let (line, column) = point_to_one_based(point);
        Self::new(offset, line, column)
    }

    /// Byte offset from the start of the file.
    #[must_use]
    pub const fn offset(self) -> usize {
        self.offset
    }

    /// One-based line number.
    #[must_use]
    pub const fn line(self) -> u32 {
        self.line
    }

    /// One-based column number (UTF-8 bytes).
    #[must_use]
    pub const fn column(self) -> u32 {
        self.column
    }

    /// Returns the position `bytes` further along the same line.
    #[must_use]
    pub fn shifted(self, bytes: usize) -> Self {
        let columns = u32::try_from(bytes).unwrap_or(u32::MAX);
        Self {
            offset: self.offset.saturating_add(bytes),
            line: self.line,
            column: self.column.saturating_add(columns),
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Converts a Tree-sitter position (0-based) to one-based display coordinates.
#[must_use]
pub(crate) fn point_to_one_based(pos: tree_sitter::Point) -> (u32, u32) {
    // Line/column numbers will realistically never exceed u32::MAX.
    let line = u32::try_from(pos.row.saturating_add(1)).unwrap_or(u32::MAX);
    let column = u32::try_from(pos.column.saturating_add(1)).unwrap_or(u32::MAX);
    (line, column)
}
