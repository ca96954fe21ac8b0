use crate::*;
use sqlx::PgPool;
use std::collections::BTreeSet;
use std::sync::Arc;

/// What the driver and server reported about the current session.
///
/// Values are opaque inputs: beyond the assembly rules in
/// [`SyntaxRule::build`] nothing here is validated, and every field may
/// be absent.
#[derive(Debug, Clone, Default)]
pub struct ConnectionMetadata {
    /// Database product banner, e.g. `"PostgreSQL 16.1 on x86_64"`.
    pub product_name: Option<String>,
    /// Identifier quote string as the driver claims it, `"["` included.
    pub identifier_quote: Option<String>,
    /// Whether unquoted identifiers are stored upper-case.
    pub stores_upper: Option<bool>,
    /// Server-specific keywords layered over the default vocabulary.
    pub extra_keywords: BTreeSet<String>,
}

impl ConnectionMetadata {
    /// Resolve this session's dialect. An explicit `QLINE_DIALECT`
    /// override wins (exact lowercase name); otherwise the product name
    /// resolves by prefix, degrading to the default dialect.
    pub fn dialect(&self) -> &'static Dialect {
        if let Some(name) = &config().dialect {
            match dialect::by_name(Some(name)) {
                Some(dialect) => return dialect,
                None => warn!("Unknown dialect override {name:?}, using product-name resolution"),
            }
        }
        dialect::resolve(self.product_name.as_deref())
    }

    /// Build the session's lexical rule from the resolved dialect plus
    /// the reported overrides.
    pub fn syntax_rule(&self) -> SyntaxRule {
        SyntaxRule::build(
            self.dialect(),
            &self.extra_keywords,
            self.identifier_quote.as_deref(),
            self.stores_upper,
        )
    }

    /// Probe a live Postgres session for what it can report: the product
    /// banner from `version()` and the server vocabulary from
    /// `pg_get_keywords()`. Quote and fold stay unreported there, so the
    /// dialect defaults cover them.
    pub async fn probe_postgres(pool: &PgPool) -> Result<Self> {
        let banner: String = sqlx::query_scalar("SELECT version()").fetch_one(pool).await?;
        let words: Vec<String> = sqlx::query_scalar("SELECT word FROM pg_get_keywords()")
            .fetch_all(pool)
            .await?;
        debug!("Connected to {banner}; {} server keywords", words.len());
        Ok(Self {
            product_name: Some(banner),
            identifier_quote: None,
            stores_upper: None,
            extra_keywords: words.into_iter().collect(),
        })
    }
}

/// Per-session rule cache.
///
/// Rules are immutable, so one `Arc` per live session is shared by every
/// consumer (highlighter, completer, continuation check) until the
/// session closes and the entry is invalidated.
pub struct RuleCache {
    rules: moka::future::Cache<String, Arc<SyntaxRule>>,
}

impl RuleCache {
    pub fn new(max_sessions: u64) -> Self {
        Self {
            rules: moka::future::Cache::new(max_sessions),
        }
    }

    /// Rule for `session`, built from `meta` on first use.
    pub async fn rule_for(&self, session: &str, meta: &ConnectionMetadata) -> Arc<SyntaxRule> {
        self.rules
            .get_with(session.to_string(), async { Arc::new(meta.syntax_rule()) })
            .await
    }

    /// Drop the cached rule when its session closes.
    pub async fn invalidate(&self, session: &str) {
        self.rules.invalidate(session).await;
    }
}

impl Default for RuleCache {
    fn default() -> Self {
        Self::new(64)
    }
}
