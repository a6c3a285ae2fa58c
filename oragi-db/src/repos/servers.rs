//! Server repository

use sqlx::PgPool;

use crate::error::Result;
use crate::models::{SchemaName, ServerId, ServerRecord};

pub struct ServerRepo<'a> {
    pool: &'a PgPool,
    schema: &'a SchemaName,
}

impl<'a> ServerRepo<'a> {
    pub fn new(pool: &'a PgPool, schema: &'a SchemaName) -> Self {
        Self { pool, schema }
    }

    fn table(&self) -> String {
        self.schema.table("servers")
    }

    /// Insert a new server row. A second insert for the same server fails
    /// with a unique violation.
    pub async fn insert(&self, rec: ServerRecord) -> Result<()> {
        sqlx::query(&format!(
            "INSERT INTO {} (server, expanded, stats) VALUES ($1, $2, $3)",
            self.table()
        ))
        .bind(rec.server)
        .bind(rec.expanded)
        .bind(rec.stats)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Insert or overwrite the flags for a server.
    pub async fn upsert(&self, rec: ServerRecord) -> Result<()> {
        sqlx::query(&format!(
            r#"
            INSERT INTO {} (server, expanded, stats) VALUES ($1, $2, $3)
            ON CONFLICT (server) DO UPDATE
            SET expanded = EXCLUDED.expanded, stats = EXCLUDED.stats
            "#,
            self.table()
        ))
        .bind(rec.server)
        .bind(rec.expanded)
        .bind(rec.stats)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Fetch a server. NULL flags read as `false`.
    pub async fn get(&self, server: ServerId) -> Result<Option<ServerRecord>> {
        let rec = sqlx::query_as::<_, ServerRecord>(&format!(
            r#"
            SELECT server, COALESCE(expanded, FALSE) AS expanded, COALESCE(stats, FALSE) AS stats
            FROM {}
            WHERE server = $1
            "#,
            self.table()
        ))
        .bind(server)
        .fetch_optional(self.pool)
        .await?;
        Ok(rec)
    }

    pub async fn list(&self) -> Result<Vec<ServerRecord>> {
        let recs = sqlx::query_as::<_, ServerRecord>(&format!(
            r#"
            SELECT server, COALESCE(expanded, FALSE) AS expanded, COALESCE(stats, FALSE) AS stats
            FROM {}
            ORDER BY server
            "#,
            self.table()
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(recs)
    }

    /// Returns false when the server has no row.
    pub async fn set_expanded(&self, server: ServerId, expanded: bool) -> Result<bool> {
        self.set_flag("expanded", server, expanded).await
    }

    /// Returns false when the server has no row.
    pub async fn set_stats(&self, server: ServerId, stats: bool) -> Result<bool> {
        self.set_flag("stats", server, stats).await
    }

    // `column` is always one of the literals above.
    async fn set_flag(&self, column: &'static str, server: ServerId, value: bool) -> Result<bool> {
        let result = sqlx::query(&format!(
            "UPDATE {} SET {} = $2 WHERE server = $1",
            self.table(),
            column
        ))
        .bind(server)
        .bind(value)
        .execute(self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns false when nothing was deleted.
    pub async fn remove(&self, server: ServerId) -> Result<bool> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE server = $1", self.table()))
            .bind(server)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
