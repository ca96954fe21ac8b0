//! Built-in SQL dialect descriptors and product-name resolution.
//!
//! A `Dialect` bundles the lexical conventions that differ between
//! database products: one-line comment tokens, identifier quoting, the
//! characters allowed in unquoted names, and how unquoted identifiers are
//! case-folded. The table below is the full built-in set; a session picks
//! its dialect from the product name the driver reports, falling back to
//! the default when nothing matches.

use std::collections::HashMap;
use std::sync::LazyLock;

/// How a database folds unquoted identifiers before comparing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseFold {
    Upper,
    Lower,
    AsWritten,
}

impl CaseFold {
    /// Apply the policy to a raw word.
    pub fn apply(self, word: &str) -> String {
        match self {
            CaseFold::Upper => word.to_uppercase(),
            CaseFold::Lower => word.to_lowercase(),
            CaseFold::AsWritten => word.to_string(),
        }
    }
}

/// Identifier quote characters. Symmetric for most products; SQL Server
/// style identifiers use the `[`/`]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quoting {
    pub open: char,
    pub close: char,
}

impl Quoting {
    pub const BRACKETS: Self = Self {
        open: '[',
        close: ']',
    };

    pub const fn symmetric(quote: char) -> Self {
        Self {
            open: quote,
            close: quote,
        }
    }
}

/// A named bundle of SQL lexical conventions for one database product.
///
/// `name == None` is the default dialect: it matches any product and
/// backs every session that resolves nothing better. Instances are
/// `'static` and immutable for the life of the process.
#[derive(Debug)]
pub struct Dialect {
    /// Product-name prefix this dialect matches; `None` for the default.
    pub name: Option<&'static str>,
    /// One-line comment tokens. Tokens are matched whole, so `"-- "`
    /// requires its trailing space.
    pub line_comments: &'static [&'static str],
    /// Block comment delimiters, when the product supports them.
    pub block_comment: Option<(&'static str, &'static str)>,
    pub quoting: Quoting,
    /// Characters allowed in unquoted identifiers beyond letters, digits
    /// and underscore.
    pub extra_name_chars: &'static str,
    pub case_fold: CaseFold,
}

impl Dialect {
    /// True for the MySQL family. MariaDB reports "MySQL" as its product
    /// name, so it lands here too.
    pub fn is_mysql_family(&self) -> bool {
        self.name == Some("MySQL")
    }

    /// True when `ch` may appear in an unquoted identifier.
    pub fn is_name_char(&self, ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_' || self.extra_name_chars.contains(ch)
    }
}

/// The default dialect: double-quoted identifiers and `--` comments,
/// close to Oracle and PostgreSQL behavior.
pub static DEFAULT: Dialect = Dialect {
    name: None,
    line_comments: &["--"],
    block_comment: Some(("/*", "*/")),
    quoting: Quoting::symmetric('"'),
    extra_name_chars: "",
    case_fold: CaseFold::Upper,
};

/// Built-in dialects in resolution order.
///
/// `resolve` takes the first case-insensitive prefix match over this
/// slice, so the order is part of the contract: a more specific name
/// (say a future "MySQL HeatWave" entry) must be listed before the
/// general prefix that would also match it.
pub static BUILTIN: &[Dialect] = &[
    Dialect {
        name: Some("PostgreSQL"),
        line_comments: &["--"],
        block_comment: Some(("/*", "*/")),
        quoting: Quoting::symmetric('"'),
        extra_name_chars: "",
        case_fold: CaseFold::Lower,
    },
    Dialect {
        name: Some("Oracle"),
        line_comments: &["--"],
        block_comment: Some(("/*", "*/")),
        quoting: Quoting::symmetric('"'),
        extra_name_chars: "",
        case_fold: CaseFold::Upper,
    },
    Dialect {
        name: Some("H2"),
        line_comments: &["--", "//"],
        block_comment: Some(("/*", "*/")),
        quoting: Quoting::symmetric('"'),
        extra_name_chars: "",
        case_fold: CaseFold::Upper,
    },
    // MySQL requires whitespace after `--`, hence the bare token is absent.
    Dialect {
        name: Some("MySQL"),
        line_comments: &["-- ", "--\t", "--\n", "#"],
        block_comment: Some(("/*", "*/")),
        quoting: Quoting::symmetric('`'),
        extra_name_chars: "#@",
        case_fold: CaseFold::Upper,
    },
    Dialect {
        name: Some("Cassandra"),
        line_comments: &["--", "//"],
        block_comment: Some(("/*", "*/")),
        quoting: Quoting::symmetric('"'),
        extra_name_chars: "",
        case_fold: CaseFold::Upper,
    },
    Dialect {
        name: Some("Phoenix"),
        line_comments: &["--", "//"],
        block_comment: Some(("/*", "*/")),
        quoting: Quoting::symmetric('"'),
        extra_name_chars: "",
        case_fold: CaseFold::Upper,
    },
];

/// Resolve a driver-reported product name to a built-in dialect.
///
/// The product name must start with the dialect's registered name
/// (case-insensitively) and be at least as long; the first match in
/// [`BUILTIN`] order wins. Absent or unknown names degrade to the
/// default dialect. Resolution never fails.
pub fn resolve(product_name: Option<&str>) -> &'static Dialect {
    let Some(product) = product_name else {
        return &DEFAULT;
    };
    BUILTIN
        .iter()
        .find(|dialect| {
            dialect.name.is_some_and(|name| {
                product
                    .get(..name.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(name))
            })
        })
        .unwrap_or(&DEFAULT)
}

static BY_NAME: LazyLock<HashMap<Option<String>, &'static Dialect>> = LazyLock::new(|| {
    let mut map: HashMap<Option<String>, &'static Dialect> = HashMap::new();
    map.insert(None, &DEFAULT);
    for dialect in BUILTIN {
        map.insert(dialect.name.map(str::to_lowercase), dialect);
    }
    map
});

/// Exact-name lookup for explicit dialect overrides (`QLINE_DIALECT`).
///
/// `None` names the default dialect. Unlike [`resolve`], an unknown name
/// returns `None` so the caller can report the bad override instead of
/// silently degrading.
pub fn by_name(name: Option<&str>) -> Option<&'static Dialect> {
    BY_NAME.get(&name.map(str::to_lowercase)).copied()
}
