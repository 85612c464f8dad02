//! Byte-range edits and the merge pass that applies them.
//!
//! Edits are applied front to back in a single pass over the immutable
//! original buffer. Offsets therefore always refer to the original bytes and
//! never need adjusting as replacements grow or shrink the output.

use std::ops::Range;

use crate::error::EditError;

/// A single replacement of `span` in the original buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    span: Range<usize>,
    replacement: String,
}

impl Edit {
    /// Builds an edit replacing `span` with `replacement`.
    #[must_use]
    pub fn new(span: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
        }
    }

    /// Byte range being replaced.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Inclusive start offset.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.span.start
    }

    /// Exclusive end offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.span.end
    }

    /// Text written in place of the span.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// Splices `edits` into `original`.
///
/// Bytes between edits are copied unchanged; each edit's span is replaced by
/// its text. With no edits the result equals `original`.
///
/// # Errors
///
/// Returns an [`EditError`] when an edit is inverted, reaches past the end of
/// the buffer, or starts before the previous edit ends.
pub fn apply_edits(original: &[u8], edits: &[Edit]) -> Result<Vec<u8>, EditError> {
    let growth: usize = edits.iter().map(|edit| edit.replacement.len()).sum();
    let mut output = Vec::with_capacity(original.len().saturating_add(growth));
    let mut cursor = 0;

    for edit in edits {
        let Range { start, end } = edit.span;
        if start > end {
            return Err(EditError::Inverted { start, end });
        }
        if end > original.len() {
            return Err(EditError::OutOfBounds {
                start,
                end,
                len: original.len(),
            });
        }
        if start < cursor {
            return Err(EditError::Overlap {
                start,
                previous_end: cursor,
            });
        }
        output.extend_from_slice(original.get(cursor..start).unwrap_or_default());
        output.extend_from_slice(edit.replacement.as_bytes());
        cursor = end;
    }

    output.extend_from_slice(original.get(cursor..).unwrap_or_default());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn apply(original: &str, edits: &[Edit]) -> String {
        let bytes = apply_edits(original.as_bytes(), edits).expect("edits should apply");
        String::from_utf8(bytes).expect("utf-8 output")
    }

    #[test]
    fn no_edits_is_identity() {
        assert_eq!(apply("fn main() {}\n", &[]), "fn main() {}\n");
    }

    #[test]
    fn replaces_single_span() {
        assert_eq!(apply("fn foo() {}", &[Edit::new(3..6, "bar")]), "fn bar() {}");
    }

    #[test]
    fn applies_multiple_edits_in_order() {
        let edits = [Edit::new(0..3, "AAA"), Edit::new(8..11, "CCC")];
        assert_eq!(apply("aaa bbb ccc", &edits), "AAA bbb CCC");
    }

    #[test]
    fn supports_growth_shrinkage_and_adjacency() {
        let edits = [
            Edit::new(0..1, "one"),
            Edit::new(1..2, ""),
            Edit::new(2..2, "+"),
        ];
        assert_eq!(apply("abc", &edits), "one+c");
    }

    #[test]
    fn preserves_crlf_between_edits() {
        let edits = [Edit::new(15..18, "TWO")];
        assert_eq!(
            apply("line one\r\nline two\r\n", &edits),
            "line one\r\nline TWO\r\n"
        );
    }

    #[rstest]
    #[case(vec![Edit::new(3..1, "")], EditError::Inverted { start: 3, end: 1 })]
    #[case(vec![Edit::new(2..9, "")], EditError::OutOfBounds { start: 2, end: 9, len: 5 })]
    #[case(
        vec![Edit::new(0..3, ""), Edit::new(2..4, "")],
        EditError::Overlap { start: 2, previous_end: 3 }
    )]
    #[case(
        vec![Edit::new(3..4, ""), Edit::new(0..1, "")],
        EditError::Overlap { start: 0, previous_end: 4 }
    )]
    fn rejects_structural_defects(#[case] edits: Vec<Edit>, #[case] expected: EditError) {
        assert_eq!(apply_edits(b"hello", &edits), Err(expected));
    }
}
