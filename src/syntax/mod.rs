//! Dialect-aware lexical classification of SQL text.
//!
//! This module groups the pieces that turn a raw, possibly half-typed SQL
//! buffer into a stream of classified spans. The components are
//! intentionally pragmatic:
//!
//! Modules:
//! - `keywords`   : Process-wide default keyword vocabulary, loaded once.
//! - `span_kind`  : Classification of lexical atoms (keywords, literals, comments, ...).
//! - `span`       : Span struct pairing a `SpanKind` with source byte offsets.
//! - `rule`       : Per-session `SyntaxRule` resolved from dialect + driver metadata.
//! - `classifier` : Single pass O(n) scanner producing a lazy span sequence.
//!
//! Design Principles:
//! 1. Accept incomplete / syntactically invalid SQL (robust for live editing).
//! 2. Spans are contiguous and cover the input exactly; consumers can
//!    reassemble the buffer from them.
//! 3. Nothing here errors: unterminated constructs end at end-of-input and
//!    surface through the scanner's terminal state instead.
//! 4. All shared values (dialects, keyword floor, built rules) are
//!    immutable after construction, so classification is safe to call from
//!    anywhere without locking.
//!
//! NOTE: This is **not** a SQL parser. It classifies raw text into the
//! lexical categories that highlighting, completion and line-continuation
//! need, nothing more.

pub mod classifier;
pub mod keywords;
pub mod rule;
pub mod span;
pub mod span_kind;

pub use classifier::{ScanState, Spans, classify, final_state, needs_more_input};
pub use keywords::default_keywords;
pub use rule::SyntaxRule;
pub use span::Span;
pub use span_kind::SpanKind;

/// Convenience prelude re-exporting the most commonly used items.
pub mod prelude {
    pub use super::{ScanState, Span, SpanKind, SyntaxRule, classify, final_state};
}
