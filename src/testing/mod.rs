#![cfg(test)]
crate::reexport!(container);
crate::reexport!(context);
pub use rstest::*;

pub(in crate::testing) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Only initialize once for all tests
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env()) // <- reads RUST_LOG
            .with_test_writer() // ensures it integrates with `cargo test` output
            .init();
    });
}

mod live_metadata_tests {
    use super::{super::*, *};

    #[test_context(ScratchSession)]
    #[tokio::test]
    async fn probes_the_product_banner(ctx: &mut ScratchSession) -> Result {
        let meta = ConnectionMetadata::probe_postgres(&ctx.pool).await?;
        let banner = meta.product_name.as_deref().unwrap_or_default();
        assert!(
            banner.starts_with("PostgreSQL"),
            "unexpected banner {banner:?}"
        );
        Ok(())
    }

    #[test_context(ScratchSession)]
    #[tokio::test]
    async fn probed_metadata_resolves_the_postgres_dialect(ctx: &mut ScratchSession) -> Result {
        let meta = ConnectionMetadata::probe_postgres(&ctx.pool).await?;
        assert_eq!(meta.dialect().name, Some("PostgreSQL"));

        let rule = meta.syntax_rule();
        assert_eq!((rule.open_quote(), rule.close_quote()), ('"', '"'));
        // the server vocabulary rides on top of the bundled floor
        assert!(rule.contains_keyword("materialized"));
        assert!(rule.contains_keyword("SELECT"));
        Ok(())
    }

    #[test_context(ScratchSession)]
    #[tokio::test]
    async fn classifies_text_that_ran_against_the_session(ctx: &mut ScratchSession) -> Result {
        sqlx::query("CREATE TABLE notes (id INT PRIMARY KEY, body TEXT)")
            .execute(&ctx.pool)
            .await?;

        let rule = ConnectionMetadata::probe_postgres(&ctx.pool).await?.syntax_rule();
        let sql = "SELECT body FROM notes -- latest";
        let spans: Vec<Span> = classify(sql, &rule).collect();
        let rebuilt: String = spans.iter().map(|s| s.text(sql)).collect();
        assert_eq!(rebuilt, sql);
        assert_eq!(
            spans.last().map(|s| s.kind),
            Some(SpanKind::LineComment),
            "{spans:?}"
        );
        assert!(!needs_more_input(sql, &rule));
        Ok(())
    }

    #[test_context(ScratchSession)]
    #[tokio::test]
    async fn rule_cache_serves_the_session(ctx: &mut ScratchSession) -> Result {
        let meta = ConnectionMetadata::probe_postgres(&ctx.pool).await?;
        let cache = RuleCache::default();
        let rule = cache.rule_for(&ctx.database, &meta).await;
        let again = cache.rule_for(&ctx.database, &meta).await;
        assert!(std::sync::Arc::ptr_eq(&rule, &again));
        Ok(())
    }
}
