//! Span model tying a `SpanKind` to its source range.
//!
//! A `Span` is intentionally minimal: its classification plus byte
//! offsets into the buffer that was scanned. Offsets let consumers slice
//! the original text (for display, or cursor range checks) without a
//! parallel reconstructed string.

use crate::syntax::span_kind::SpanKind;

/// A classified region of input with inclusive start and exclusive end
/// byte offsets into the scanned text.
///
/// Invariants:
/// - `end > start` (the classifier never emits empty spans)
/// - both offsets lie on UTF-8 boundaries of the original input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(kind: SpanKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    /// Byte length of this span.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slice the original input down to this span's text.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// True if the cursor (byte offset) lies within this span.
    ///
    /// NOTE: End is exclusive, so `cursor == end` returns false.
    pub fn contains(&self, cursor: usize) -> bool {
        cursor >= self.start && cursor < self.end
    }

    /// Convenience: the `(start, end)` pair.
    pub const fn range(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}
