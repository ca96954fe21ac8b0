use crate::*;
use itertools::Itertools as _;

/// A completion candidate offered while the user types a SQL query:
/// vocabulary keywords, or identifiers already visible in the buffer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, derive_more::Display)]
pub enum Suggestion {
    /// Vocabulary keyword, rendered in the session's identifier case.
    #[display("{_0}")]
    Keyword(String),
    /// Identifier that already appeared earlier in the buffer.
    #[display("{_0}")]
    Identifier(String),
}

pub type Suggestions = Vec<Suggestion>;

impl Suggestion {
    /// Candidates for the partial word ending at `cursor` (a byte offset
    /// on a char boundary of `sql`).
    ///
    /// Strategy:
    /// 1. Nothing is offered while the cursor sits in a span that
    ///    suppresses completion (comments, string literals, quoted
    ///    identifiers).
    /// 2. The partial word is the maximal identifier-character run ending
    ///    at the cursor; an empty run matches everything.
    /// 3. Keywords come first: every effective keyword matching the
    ///    typed prefix case-insensitively, rendered per the rule's fold
    ///    policy. Identifiers seen earlier in the buffer follow.
    pub fn search(sql: &str, cursor: usize, rule: &SyntaxRule) -> Suggestions {
        let cursor = cursor.min(sql.len());
        let suppressed = classify(sql, rule).any(|span| {
            span.contains(cursor.saturating_sub(1)) && span.kind.suppresses_completion()
        });
        if suppressed {
            return vec![];
        }

        let head = &sql[..cursor];
        let prefix_start = head
            .char_indices()
            .rev()
            .take_while(|(_, ch)| rule.is_name_char(*ch))
            .last()
            .map_or(cursor, |(idx, _)| idx);
        let prefix = &head[prefix_start..];

        let fold = rule.case_fold();
        let mut out: Suggestions = rule
            .keywords()
            .filter(|k| matches_prefix(k, prefix))
            .map(|k| fold.apply(k))
            .sorted()
            .dedup()
            .map(Suggestion::Keyword)
            .collect();

        out.extend(
            classify(sql, rule)
                .filter(|span| span.kind == SpanKind::Identifier && span.end <= prefix_start)
                .map(|span| span.text(sql))
                .filter(|text| matches_prefix(text, prefix))
                .map(str::to_string)
                .sorted()
                .dedup()
                .map(Suggestion::Identifier),
        );
        out
    }
}

fn matches_prefix(candidate: &str, prefix: &str) -> bool {
    candidate
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
