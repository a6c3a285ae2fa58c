//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. Pools are cheap to
//! clone and every clone shares the same connections.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum connections for the pool.
/// Kept low for a single bot process.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Parameters for building a new pool.
///
/// The URL carries host, port, credentials and database; this layer does
/// not look inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectParams {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl ConnectParams {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    pub fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
    }
}

/// Create a PostgreSQL connection pool.
///
/// Connects eagerly, so a bad URL, refused connection or failed login is
/// reported here rather than on first use.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&ConnectParams::new("postgres://localhost/oragi")).await?;
/// ```
pub async fn create_pool(params: &ConnectParams) -> Result<PgPool, sqlx::Error> {
    params.pool_options().connect(&params.url).await
}

/// Build a pool without opening any connection yet.
///
/// Connection errors surface on the first statement executed.
pub fn create_pool_lazy(params: &ConnectParams) -> Result<PgPool, sqlx::Error> {
    params.pool_options().connect_lazy(&params.url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_defaults() {
        let params = ConnectParams::new("postgres://localhost/oragi");
        assert_eq!(params.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(params.acquire_timeout, DEFAULT_ACQUIRE_TIMEOUT);

        let params = params
            .max_connections(2)
            .acquire_timeout(Duration::from_millis(250));
        assert_eq!(params.max_connections, 2);
        assert_eq!(params.acquire_timeout, Duration::from_millis(250));
    }

    #[tokio::test]
    async fn invalid_url_fails_fast() {
        let err = create_pool(&ConnectParams::new("not a url")).await.unwrap_err();
        assert!(matches!(err, sqlx::Error::Configuration(_)));
    }

    #[tokio::test]
    async fn lazy_pool_does_not_connect() {
        let params = ConnectParams::new("postgres://oragi@127.0.0.1:1/oragi");
        let pool = create_pool_lazy(&params).expect("lazy pool should build");
        assert_eq!(pool.size(), 0);
    }

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p oragi-db -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&ConnectParams::new(url))
            .await
            .expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }
}
