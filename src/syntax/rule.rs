//! Per-session lexical configuration.
//!
//! A `SyntaxRule` is the fully resolved bundle the classifier scans with:
//! effective keywords, quote characters, comment tokens and case-fold
//! policy. It is built once when a connection reports its metadata and
//! shared immutably until the session closes.

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::dialect::{self, CaseFold, Dialect, Quoting};
use crate::syntax::keywords;

#[derive(Debug, Clone)]
pub struct SyntaxRule {
    /// Driver-supplied keywords layered over the shared floor. Overlays
    /// only ever add; a session cannot remove a default keyword.
    extra_keywords: BTreeSet<String>,
    quoting: Quoting,
    /// Dialect comment tokens, longest first, so `"-- "` is tried before
    /// a bare `"--"` could shadow it.
    line_comments: Vec<&'static str>,
    block_comment: Option<(&'static str, &'static str)>,
    extra_name_chars: &'static str,
    case_fold: CaseFold,
}

impl SyntaxRule {
    /// Resolve a rule from a dialect plus driver-reported metadata.
    ///
    /// MySQL-family drivers are known to misreport their identifier
    /// quote, so the dialect's backtick always wins there. Elsewhere a
    /// reported `"["` selects the bracket pair, a blank or absent report
    /// falls back to the dialect default, and any other report
    /// contributes its first character for both ends.
    pub fn build<I, S>(
        dialect: &Dialect,
        extra_keywords: I,
        driver_quote: Option<&str>,
        driver_upper: Option<bool>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let quoting = if dialect.is_mysql_family() {
            dialect.quoting
        } else {
            match driver_quote.map(str::trim) {
                Some("[") => Quoting::BRACKETS,
                None | Some("") => dialect.quoting,
                Some(quote) => quote
                    .chars()
                    .next()
                    .map_or(dialect.quoting, Quoting::symmetric),
            }
        };

        let case_fold = match driver_upper {
            Some(true) => CaseFold::Upper,
            Some(false) => CaseFold::Lower,
            None => dialect.case_fold,
        };

        let mut line_comments = dialect.line_comments.to_vec();
        line_comments.sort_by_key(|token| Reverse(token.len()));

        Self {
            extra_keywords: keywords::close_over_case(extra_keywords),
            quoting,
            line_comments,
            block_comment: dialect.block_comment,
            extra_name_chars: dialect.extra_name_chars,
            case_fold,
        }
    }

    /// Rule with the dialect's own defaults and no driver input.
    pub fn for_dialect(dialect: &Dialect) -> Self {
        Self::build(dialect, std::iter::empty::<&str>(), None, None)
    }

    /// The rule used before any connection has reported metadata.
    pub fn default_rule() -> &'static SyntaxRule {
        static DEFAULT: LazyLock<SyntaxRule> =
            LazyLock::new(|| SyntaxRule::for_dialect(&dialect::DEFAULT));
        LazyLock::force(&DEFAULT)
    }

    /// Keyword membership: the session overlay first, then the shared
    /// floor. The token is expected to be case-folded already.
    pub fn contains_keyword(&self, token: &str) -> bool {
        self.extra_keywords.contains(token) || keywords::default_keywords().contains(token)
    }

    /// All effective keywords: shared floor plus the session overlay.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        keywords::default_keywords()
            .iter()
            .map(String::as_str)
            .chain(self.extra_keywords.iter().map(String::as_str))
    }

    pub fn open_quote(&self) -> char {
        self.quoting.open
    }

    pub fn close_quote(&self) -> char {
        self.quoting.close
    }

    /// Comment tokens in match order (longest first).
    pub fn line_comments(&self) -> &[&'static str] {
        &self.line_comments
    }

    pub fn block_comment(&self) -> Option<(&'static str, &'static str)> {
        self.block_comment
    }

    pub fn case_fold(&self) -> CaseFold {
        self.case_fold
    }

    /// True when `ch` may appear in an unquoted identifier under this rule.
    pub fn is_name_char(&self, ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_' || self.extra_name_chars.contains(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn mysql() -> &'static Dialect {
        dialect::resolve(Some("MySQL"))
    }

    #[rstest]
    #[case(Some("\""))]
    #[case(Some("["))]
    #[case(Some(""))]
    #[case(Some(" "))]
    #[case(None)]
    fn mysql_ignores_driver_quote(#[case] driver_quote: Option<&str>) {
        let rule = SyntaxRule::build(mysql(), std::iter::empty::<&str>(), driver_quote, None);
        assert_eq!((rule.open_quote(), rule.close_quote()), ('`', '`'));
    }

    #[rstest]
    #[case(Some("["), '[', ']')]
    #[case(Some("\""), '"', '"')]
    #[case(Some("``"), '`', '`')]
    #[case(Some(""), '"', '"')]
    #[case(Some(" "), '"', '"')]
    #[case(None, '"', '"')]
    fn default_dialect_quote_resolution(
        #[case] driver_quote: Option<&str>,
        #[case] open: char,
        #[case] close: char,
    ) {
        let rule = SyntaxRule::build(
            &dialect::DEFAULT,
            std::iter::empty::<&str>(),
            driver_quote,
            None,
        );
        assert_eq!((rule.open_quote(), rule.close_quote()), (open, close));
    }

    #[test]
    fn comment_tokens_are_longest_first() {
        let rule = SyntaxRule::for_dialect(mysql());
        let lengths: Vec<usize> = rule.line_comments().iter().map(|t| t.len()).collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]), "{lengths:?}");
        assert_eq!(*rule.line_comments().last().expect("non-empty"), "#");
    }

    #[test]
    fn extra_keywords_add_but_never_shadow() {
        let bare = SyntaxRule::for_dialect(&dialect::DEFAULT);
        let extended = SyntaxRule::build(&dialect::DEFAULT, ["ZETTA"], None, None);

        assert!(!bare.contains_keyword("ZETTA"));
        assert!(extended.contains_keyword("ZETTA"));
        assert!(extended.contains_keyword("zetta"));
        // the shared floor is intact in both
        assert!(bare.contains_keyword("SELECT"));
        assert!(extended.contains_keyword("SELECT"));
    }

    /// Everything known under a smaller overlay stays known under a
    /// larger one.
    #[test]
    fn keyword_containment_is_monotonic() {
        let small = SyntaxRule::build(&dialect::DEFAULT, ["ALPHA"], None, None);
        let large = SyntaxRule::build(&dialect::DEFAULT, ["ALPHA", "BETA"], None, None);
        for token in small.keywords() {
            assert!(large.contains_keyword(token), "{token} lost in larger overlay");
        }
    }

    #[rstest]
    #[case(Some(true), CaseFold::Upper)]
    #[case(Some(false), CaseFold::Lower)]
    #[case(None, CaseFold::Upper)]
    fn fold_policy_resolution(#[case] driver_upper: Option<bool>, #[case] expected: CaseFold) {
        let rule = SyntaxRule::build(
            &dialect::DEFAULT,
            std::iter::empty::<&str>(),
            None,
            driver_upper,
        );
        assert_eq!(rule.case_fold(), expected);
    }

    #[test]
    fn unreported_fold_uses_the_dialect_policy() {
        let postgres = dialect::resolve(Some("PostgreSQL 16.1"));
        let rule = SyntaxRule::for_dialect(postgres);
        assert_eq!(rule.case_fold(), CaseFold::Lower);
    }
}
