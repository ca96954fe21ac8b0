//! The process-wide default keyword vocabulary.
//!
//! Loaded exactly once, on first access, from the comma-separated list
//! bundled next to this module. Every keyword is stored in both its
//! literal and lower-cased form so that membership tests succeed no
//! matter which case-fold policy a session applies to user text.
//!
//! A file named by `QLINE_KEYWORDS_FILE` is merged in the same way; if it
//! cannot be read the vocabulary simply ships without it. Callers must
//! not assume the set is non-empty.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;

use crate::config::config;
use crate::error::Result;
use crate::warn;

const BUNDLED: &str = include_str!("sql-keywords.txt");

/// The shared keyword floor. Immutable after the first call; concurrent
/// first callers are serialized by the `OnceLock`.
pub fn default_keywords() -> &'static BTreeSet<String> {
    static KEYWORDS: OnceLock<BTreeSet<String>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        let mut set = close_over_case(BUNDLED.split(','));
        if let Some(path) = &config().keywords_file {
            match read_extra(Path::new(path)) {
                Ok(line) => set.extend(close_over_case(line.split(','))),
                Err(e) => warn!("Ignoring keyword file {path}: {e}"),
            }
        }
        set
    })
}

/// Case-close a keyword collection: each surviving entry is inserted both
/// verbatim and lower-cased. Blank entries are skipped.
pub fn close_over_case<I, S>(words: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = BTreeSet::new();
    for word in words {
        let word = word.as_ref().trim();
        if word.is_empty() {
            continue;
        }
        set.insert(word.to_lowercase());
        set.insert(word.to_string());
    }
    set
}

fn read_extra(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}
