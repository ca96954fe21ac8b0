//! Lexical categories assigned by the classifier.
//!
//! Purely lexical: no grammar is implied, and anything the scanner cannot
//! place in a more specific bucket falls out as `Punctuation`. Consumers
//! map these to display styles (highlighter), candidate filters
//! (completion) or nothing at all (continuation only reads scanner state).

/// Classification for a span produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// Word found in the session's effective keyword set.
    Keyword,
    /// Unquoted identifier (also covers numeric literals; the scanner
    /// does not distinguish them).
    Identifier,
    /// Identifier wrapped in the dialect's quote characters.
    QuotedIdentifier,
    /// Single-quoted string literal, `''` escapes included.
    StringLiteral,
    /// Comment running from a dialect comment token to end of line.
    LineComment,
    /// Delimited comment, possibly spanning lines.
    BlockComment,
    /// Run of whitespace.
    Whitespace,
    /// Any other single character.
    Punctuation,
}

impl SpanKind {
    /// Canonical lowercase name, useful for display or debugging.
    pub const fn as_str(self) -> &'static str {
        match self {
            SpanKind::Keyword => "keyword",
            SpanKind::Identifier => "identifier",
            SpanKind::QuotedIdentifier => "quoted-identifier",
            SpanKind::StringLiteral => "string",
            SpanKind::LineComment => "line-comment",
            SpanKind::BlockComment => "block-comment",
            SpanKind::Whitespace => "whitespace",
            SpanKind::Punctuation => "punctuation",
        }
    }

    /// True for either comment category.
    pub const fn is_comment(self) -> bool {
        matches!(self, SpanKind::LineComment | SpanKind::BlockComment)
    }

    /// True when a completion popup should stay quiet inside this span.
    pub const fn suppresses_completion(self) -> bool {
        matches!(
            self,
            SpanKind::QuotedIdentifier
                | SpanKind::StringLiteral
                | SpanKind::LineComment
                | SpanKind::BlockComment
        )
    }
}

impl std::fmt::Display for SpanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
