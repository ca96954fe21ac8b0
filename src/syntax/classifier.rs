//! Lenient single-pass scanner turning SQL text into classified spans.
//!
//! Scope / Intent:
//! - Designed for a live editor: the input is usually incomplete and
//!   frequently invalid, and that must never be an error.
//! - Classification is purely lexical; a `SyntaxRule` supplies the
//!   dialect-specific pieces (comment tokens, quote characters, keyword
//!   vocabulary, case folding).
//!
//! Behavior:
//! - Emits spans that are contiguous and cover the input exactly.
//! - Unterminated strings, quoted identifiers and block comments run to
//!   end-of-input; the scanner's terminal state records what was left
//!   open, which is exactly the signal the line-continuation check reads.
//!
//! Guarantees:
//! - Never panics on valid UTF-8, never returns an error.
//! - O(n) time; each call to [`classify`] re-scans from the start.

use crate::syntax::rule::SyntaxRule;
use crate::syntax::span::Span;
use crate::syntax::span_kind::SpanKind;

/// Scanner state. `Normal` between lexemes; an `In*` state is live while
/// a multi-character construct is being consumed and remains the reported
/// state when input runs out mid-construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Normal,
    InLineComment,
    InBlockComment,
    InStringLiteral,
    InQuotedIdentifier,
}

impl ScanState {
    /// True when more input is expected before the construct can close.
    ///
    /// A line comment ends with its line no matter what, so it never
    /// holds a statement open.
    pub const fn is_open(self) -> bool {
        matches!(
            self,
            ScanState::InBlockComment | ScanState::InStringLiteral | ScanState::InQuotedIdentifier
        )
    }
}

/// Lazy span sequence over one input string.
///
/// Spans come out in source order, non-overlapping, and concatenate back
/// to the input. The iterator is cheap to construct; every [`classify`]
/// call starts a fresh scan.
pub struct Spans<'a> {
    text: &'a str,
    rule: &'a SyntaxRule,
    pos: usize,
    state: ScanState,
}

/// Classify `text` under `rule`.
pub fn classify<'a>(text: &'a str, rule: &'a SyntaxRule) -> Spans<'a> {
    Spans {
        text,
        rule,
        pos: 0,
        state: ScanState::Normal,
    }
}

/// Terminal scanner state for a whole buffer.
pub fn final_state(text: &str, rule: &SyntaxRule) -> ScanState {
    let mut spans = classify(text, rule);
    while spans.next().is_some() {}
    spans.state()
}

/// Continuation signal: does `text` leave a construct open?
pub fn needs_more_input(text: &str, rule: &SyntaxRule) -> bool {
    final_state(text, rule).is_open()
}

impl Spans<'_> {
    /// The scanner state at the current position. Once the iterator is
    /// exhausted this is the terminal state of the whole input.
    pub const fn state(&self) -> ScanState {
        self.state
    }

    fn line_comment(&mut self, start: usize) -> Span {
        self.state = ScanState::InLineComment;
        let end = match self.text[start..].find('\n') {
            Some(nl) => {
                self.state = ScanState::Normal;
                start + nl + 1
            }
            None => self.text.len(),
        };
        self.pos = end;
        Span::new(SpanKind::LineComment, start, end)
    }

    fn block_comment(&mut self, start: usize, open: &str, close: &str) -> Span {
        self.state = ScanState::InBlockComment;
        let body = start + open.len();
        let end = match self.text[body..].find(close) {
            Some(offset) => {
                self.state = ScanState::Normal;
                body + offset + close.len()
            }
            None => self.text.len(),
        };
        self.pos = end;
        Span::new(SpanKind::BlockComment, start, end)
    }

    /// A doubled `''` stays inside the literal; a lone `'` closes it.
    fn string_literal(&mut self, start: usize) -> Span {
        self.state = ScanState::InStringLiteral;
        let mut search = start + 1;
        let end = loop {
            match self.text[search..].find('\'') {
                Some(offset) => {
                    let quote = search + offset;
                    if self.text[quote + 1..].starts_with('\'') {
                        search = quote + 2;
                    } else {
                        self.state = ScanState::Normal;
                        break quote + 1;
                    }
                }
                None => break self.text.len(),
            }
        };
        self.pos = end;
        Span::new(SpanKind::StringLiteral, start, end)
    }

    /// No escape mechanism: the close-quote character always closes.
    fn quoted_identifier(&mut self, start: usize) -> Span {
        self.state = ScanState::InQuotedIdentifier;
        let close = self.rule.close_quote();
        let body = start + self.rule.open_quote().len_utf8();
        let end = match self.text[body..].find(close) {
            Some(offset) => {
                self.state = ScanState::Normal;
                body + offset + close.len_utf8()
            }
            None => self.text.len(),
        };
        self.pos = end;
        Span::new(SpanKind::QuotedIdentifier, start, end)
    }

    /// Maximal run of identifier characters, classified as a keyword iff
    /// its case-folded form is in the effective vocabulary.
    fn word(&mut self, start: usize) -> Span {
        let rest = &self.text[start..];
        let end = start
            + rest
                .char_indices()
                .find(|(_, ch)| !self.rule.is_name_char(*ch))
                .map_or(rest.len(), |(offset, _)| offset);
        self.pos = end;
        let folded = self.rule.case_fold().apply(&self.text[start..end]);
        let kind = if self.rule.contains_keyword(&folded) {
            SpanKind::Keyword
        } else {
            SpanKind::Identifier
        };
        Span::new(kind, start, end)
    }

    fn whitespace(&mut self, start: usize) -> Span {
        let rest = &self.text[start..];
        let end = start
            + rest
                .char_indices()
                .find(|(_, ch)| !ch.is_whitespace())
                .map_or(rest.len(), |(offset, _)| offset);
        self.pos = end;
        Span::new(SpanKind::Whitespace, start, end)
    }
}

impl Iterator for Spans<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        if self.pos >= self.text.len() {
            return None;
        }
        let start = self.pos;
        let rest = &self.text[start..];
        let first = rest.chars().next()?;

        // Comment tokens first; the rule keeps them longest-first so a
        // token with a required trailing space beats its bare prefix.
        if self
            .rule
            .line_comments()
            .iter()
            .any(|token| rest.starts_with(token))
        {
            return Some(self.line_comment(start));
        }
        if let Some((open, close)) = self.rule.block_comment() {
            if rest.starts_with(open) {
                return Some(self.block_comment(start, open, close));
            }
        }
        if first == '\'' {
            return Some(self.string_literal(start));
        }
        if first == self.rule.open_quote() {
            return Some(self.quoted_identifier(start));
        }
        if self.rule.is_name_char(first) {
            return Some(self.word(start));
        }
        if first.is_whitespace() {
            return Some(self.whitespace(start));
        }
        let end = start + first.len_utf8();
        self.pos = end;
        Some(Span::new(SpanKind::Punctuation, start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect;
    use crate::syntax::rule::SyntaxRule;
    use rstest::rstest;

    fn rule_for(product: Option<&str>) -> SyntaxRule {
        SyntaxRule::for_dialect(dialect::resolve(product))
    }

    fn kinds_and_texts(sql: &str, rule: &SyntaxRule) -> Vec<(SpanKind, String)> {
        classify(sql, rule)
            .filter(|span| span.kind != SpanKind::Whitespace)
            .map(|span| (span.kind, span.text(sql).to_string()))
            .collect()
    }

    #[rstest]
    #[case("SELECT * FROM t -- trailing comment")]
    #[case("SELECT 'it''s ok'")]
    #[case("`my col` unterminated `other")]
    #[case("/* block */ SELECT 1")]
    #[case("")]
    #[case("   \t\n  ")]
    #[case("päivä || 'süß'")]
    fn spans_cover_the_input_exactly(#[case] sql: &str) {
        for rule in [rule_for(None), rule_for(Some("MySQL"))] {
            let spans: Vec<Span> = classify(sql, &rule).collect();
            let mut expected_start = 0;
            for span in &spans {
                assert_eq!(span.start, expected_start, "gap or overlap in {sql:?}");
                assert!(span.end > span.start, "empty span in {sql:?}");
                expected_start = span.end;
            }
            assert_eq!(expected_start, sql.len(), "input not covered: {sql:?}");
            let rebuilt: String = spans.iter().map(|s| s.text(sql)).collect();
            assert_eq!(rebuilt, sql);
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let rule = rule_for(None);
        let sql = "SELECT a, 'b''c' FROM \"d\" -- e";
        let first: Vec<Span> = classify(sql, &rule).collect();
        let second: Vec<Span> = classify(sql, &rule).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn keywords_identifiers_and_trailing_comment() {
        let rule = rule_for(None);
        let sql = "SELECT * FROM t -- trailing comment";
        assert_eq!(
            kinds_and_texts(sql, &rule),
            [
                (SpanKind::Keyword, "SELECT".into()),
                (SpanKind::Punctuation, "*".into()),
                (SpanKind::Keyword, "FROM".into()),
                (SpanKind::Identifier, "t".into()),
                (SpanKind::LineComment, "-- trailing comment".into()),
            ]
        );
    }

    #[test]
    fn backtick_quoted_identifier_is_one_span() {
        let rule = rule_for(Some("MySQL"));
        let sql = "`my col`";
        assert_eq!(
            kinds_and_texts(sql, &rule),
            [(SpanKind::QuotedIdentifier, "`my col`".into())]
        );
    }

    #[test]
    fn doubled_quote_stays_inside_the_literal() {
        let rule = rule_for(None);
        let sql = "SELECT 'it''s ok'";
        assert_eq!(
            kinds_and_texts(sql, &rule),
            [
                (SpanKind::Keyword, "SELECT".into()),
                (SpanKind::StringLiteral, "'it''s ok'".into()),
            ]
        );
    }

    #[test]
    fn unterminated_string_reports_more_input_expected() {
        let rule = rule_for(None);
        let sql = "SELECT 'unterminated";
        assert_eq!(final_state(sql, &rule), ScanState::InStringLiteral);
        assert!(needs_more_input(sql, &rule));
    }

    #[rstest]
    #[case("SELECT 1", ScanState::Normal, false)]
    #[case("SELECT 1; -- done", ScanState::InLineComment, false)]
    #[case("SELECT 'open", ScanState::InStringLiteral, true)]
    #[case("SELECT \"open", ScanState::InQuotedIdentifier, true)]
    #[case("SELECT 1 /* open", ScanState::InBlockComment, true)]
    #[case("SELECT 1 /* closed */", ScanState::Normal, false)]
    #[case("-- done\nSELECT 1", ScanState::Normal, false)]
    fn terminal_state_per_construct(
        #[case] sql: &str,
        #[case] state: ScanState,
        #[case] open: bool,
    ) {
        let rule = rule_for(None);
        assert_eq!(final_state(sql, &rule), state);
        assert_eq!(needs_more_input(sql, &rule), open);
    }

    #[test]
    fn line_comment_ends_with_its_line() {
        let rule = rule_for(None);
        let sql = "-- first\nSELECT 1";
        let spans: Vec<Span> = classify(sql, &rule).collect();
        assert_eq!(spans[0].kind, SpanKind::LineComment);
        assert_eq!(spans[0].text(sql), "-- first\n");
        assert!(
            spans[1..]
                .iter()
                .any(|s| s.kind == SpanKind::Keyword && s.text(sql) == "SELECT")
        );
    }

    #[test]
    fn mysql_requires_whitespace_after_dashes() {
        let rule = rule_for(Some("MySQL-5.7-community"));
        // no whitespace: not a comment in this dialect
        assert!(
            kinds_and_texts("SELECT 1 --x", &rule)
                .iter()
                .all(|(kind, _)| !kind.is_comment())
        );
        // with the required space the longest token wins
        let spans = kinds_and_texts("SELECT 1 -- x", &rule);
        assert_eq!(
            spans.last(),
            Some(&(SpanKind::LineComment, "-- x".to_string()))
        );
    }

    #[test]
    fn hash_comment_only_starts_at_a_word_boundary() {
        let rule = rule_for(Some("MySQL"));
        // `#` opens a comment on its own...
        assert_eq!(
            kinds_and_texts("# hello", &rule),
            [(SpanKind::LineComment, "# hello".into())]
        );
        // ...but continues an identifier run, where it is a name char
        assert_eq!(
            kinds_and_texts("tbl#1", &rule),
            [(SpanKind::Identifier, "tbl#1".into())]
        );
    }

    #[test]
    fn bracket_pair_quoting() {
        let rule = SyntaxRule::build(
            &dialect::DEFAULT,
            std::iter::empty::<&str>(),
            Some("["),
            None,
        );
        assert_eq!(
            kinds_and_texts("SELECT [my col] FROM t", &rule),
            [
                (SpanKind::Keyword, "SELECT".into()),
                (SpanKind::QuotedIdentifier, "[my col]".into()),
                (SpanKind::Keyword, "FROM".into()),
                (SpanKind::Identifier, "t".into()),
            ]
        );
    }

    #[test]
    fn keywords_fold_before_lookup() {
        let rule = rule_for(None); // folds upper
        let sql = "select From WHERE";
        assert!(
            kinds_and_texts(sql, &rule)
                .iter()
                .all(|(kind, _)| *kind == SpanKind::Keyword)
        );
    }

    #[test]
    fn extra_keywords_classify_as_keywords() {
        let rule = SyntaxRule::build(&dialect::DEFAULT, ["MATERIALIZED"], None, None);
        assert_eq!(
            kinds_and_texts("MATERIALIZED view_name", &rule),
            [
                (SpanKind::Keyword, "MATERIALIZED".into()),
                (SpanKind::Identifier, "view_name".into()),
            ]
        );
    }

    #[test]
    fn comments_hide_quotes_and_quotes_hide_comments() {
        let rule = rule_for(None);
        // a quote inside a comment does not open a string
        assert_eq!(
            final_state("-- don't\n", &rule),
            ScanState::Normal,
            "comment must swallow the quote"
        );
        // a comment token inside a string stays literal text
        assert_eq!(
            kinds_and_texts("'a -- b'", &rule),
            [(SpanKind::StringLiteral, "'a -- b'".into())]
        );
    }
}
