//! Shared test harness for makan integration tests.
//!
//! One PostgreSQL server backs a whole test binary; every test creates its
//! own throwaway database inside it, so tests run in parallel without
//! stepping on each other's rows.
//!
//! Where the server comes from:
//! - **`MAKAN_TEST_PG_URL`** set (nextest setup script): an external server,
//!   used directly. No testcontainers overhead per process.
//! - **No env var** (`cargo test`): a container started via testcontainers
//!   on first use, shared through a `OnceCell`.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use testcontainers::ContainerAsync;
use testcontainers::ImageExt;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

use makan_db::config::DbConfig;
use makan_db::pool;

/// Server root URL plus the container handle that keeps it alive.
struct SharedPg {
    base_url: String,
    /// `None` when `MAKAN_TEST_PG_URL` supplied an external server.
    _container: Option<ContainerAsync<Postgres>>,
}

static SHARED_PG: OnceCell<SharedPg> = OnceCell::const_new();

async fn init_shared_pg() -> SharedPg {
    if let Ok(url) = std::env::var("MAKAN_TEST_PG_URL") {
        return SharedPg {
            base_url: url,
            _container: None,
        };
    }

    let container = Postgres::default()
        .with_tag("18")
        .start()
        .await
        .expect("failed to start PostgreSQL container");

    let host = container.get_host().await.expect("failed to get host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("failed to get mapped port");

    SharedPg {
        base_url: format!("postgresql://postgres:postgres@{host}:{port}"),
        _container: Some(container),
    }
}

/// Root URL of the shared PostgreSQL server (no database name appended).
///
/// Starts the container on first call when `MAKAN_TEST_PG_URL` is unset.
pub async fn pg_url() -> &'static str {
    let shared = SHARED_PG.get_or_init(init_shared_pg).await;
    &shared.base_url
}

/// Create a uniquely-named database with migrations applied.
///
/// Returns `(pool, db_name)`; pass `db_name` to [`drop_test_db`] when the
/// test is done.
pub async fn create_test_db() -> (PgPool, String) {
    let base_url = pg_url().await;
    let db_name = format!("makan_test_{}", Uuid::new_v4().simple());

    let config = DbConfig::new(format!("{base_url}/{db_name}"));
    pool::ensure_database_exists(&config)
        .await
        .unwrap_or_else(|e| panic!("failed to create test database {db_name}: {e:#}"));

    // Container cold starts can be slow, so allow a generous acquire timeout.
    let test_pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database_url)
        .await
        .unwrap_or_else(|e| panic!("failed to connect to test database {db_name}: {e}"));

    pool::run_migrations(&test_pool)
        .await
        .expect("migrations should succeed");

    (test_pool, db_name)
}

/// Drop a test database, kicking out any connection still attached to it.
///
/// Safe to call for a database that is already gone.
pub async fn drop_test_db(db_name: &str) {
    let base_url = pg_url().await;

    let admin_pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&format!("{base_url}/postgres"))
        .await
        .expect("failed to connect to maintenance database for cleanup");

    let terminate = format!(
        "SELECT pg_terminate_backend(pid) \
         FROM pg_stat_activity \
         WHERE datname = '{db_name}' AND pid <> pg_backend_pid()"
    );
    let _ = admin_pool.execute(terminate.as_str()).await;

    let _ = admin_pool
        .execute(format!("DROP DATABASE IF EXISTS {db_name}").as_str())
        .await;
    admin_pool.close().await;
}
