use crate::testing::*;
use sqlx::{PgPool, Postgres};
use test_context::AsyncTestContext;
pub use test_context::test_context;

/// Per-test session context: each test gets its own freshly created
/// database on the shared container, dropped again on teardown.
pub struct ScratchSession {
    pub pool: PgPool,
    pub database: String,
}

impl ScratchSession {
    async fn random_database<'c, E: sqlx::Executor<'c, Database = Postgres>>(exec: E) -> String {
        use rand::Rng;
        let db = format!(
            "session_db_{}",
            rand::rng()
                .sample_iter(&rand::distr::Alphanumeric)
                .take(8)
                .map(char::from)
                .collect::<String>()
                .to_lowercase()
        );

        sqlx::query(sqlx::AssertSqlSafe(format!("CREATE DATABASE {db}")))
            .execute(exec)
            .await
            .expect("Failed to create test database");
        db
    }
}

impl AsyncTestContext for ScratchSession {
    async fn setup() -> Self {
        crate::testing::common_init();
        let admin_pool = pool("postgres").await;
        let database = Self::random_database(&admin_pool).await;

        Self {
            pool: pool(&database).await,
            database,
        }
    }

    async fn teardown(self) {
        self.pool.close().await;

        let pool = pool("postgres").await;
        sqlx::query(sqlx::AssertSqlSafe(format!(
            "DROP DATABASE {}",
            self.database
        )))
        .execute(&pool)
        .await
        .expect("Failed to drop test database");
    }
}
