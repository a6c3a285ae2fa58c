//! Request repository

use sqlx::PgPool;

use crate::error::Result;
use crate::models::{NewRequest, RequestRecord, SchemaName, ServerId, UserId};

pub struct RequestRepo<'a> {
    pool: &'a PgPool,
    schema: &'a SchemaName,
}

impl<'a> RequestRepo<'a> {
    pub fn new(pool: &'a PgPool, schema: &'a SchemaName) -> Self {
        Self { pool, schema }
    }

    fn table(&self) -> String {
        self.schema.table("requests")
    }

    /// Record a request, returning it with its sequence id.
    pub async fn insert(&self, req: NewRequest) -> Result<RequestRecord> {
        let rec = sqlx::query_as::<_, RequestRecord>(&format!(
            r#"
            INSERT INTO {} (requester, server, medium, title)
            VALUES ($1, $2, $3, $4)
            RETURNING id, requester, server, medium, title
            "#,
            self.table()
        ))
        .bind(req.requester)
        .bind(req.server)
        .bind(req.medium.code())
        .bind(req.title.as_str())
        .fetch_one(self.pool)
        .await?;
        Ok(rec)
    }

    /// All requests made in a server, oldest first.
    pub async fn list_for_server(&self, server: ServerId) -> Result<Vec<RequestRecord>> {
        let recs = sqlx::query_as::<_, RequestRecord>(&format!(
            r#"
            SELECT id, requester, server, medium, title
            FROM {}
            WHERE server = $1
            ORDER BY id
            "#,
            self.table()
        ))
        .bind(server)
        .fetch_all(self.pool)
        .await?;
        Ok(recs)
    }

    /// Requests one user made in one server, oldest first.
    pub async fn list_for_requester(
        &self,
        requester: UserId,
        server: ServerId,
    ) -> Result<Vec<RequestRecord>> {
        let recs = sqlx::query_as::<_, RequestRecord>(&format!(
            r#"
            SELECT id, requester, server, medium, title
            FROM {}
            WHERE requester = $1 AND server = $2
            ORDER BY id
            "#,
            self.table()
        ))
        .bind(requester)
        .bind(server)
        .fetch_all(self.pool)
        .await?;
        Ok(recs)
    }

    pub async fn count_for_server(&self, server: ServerId) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(&format!(
            "SELECT COUNT(*) FROM {} WHERE server = $1",
            self.table()
        ))
        .bind(server)
        .fetch_one(self.pool)
        .await?;
        Ok(count)
    }

    /// Delete by full primary key. Returns false when nothing matched.
    pub async fn remove(&self, id: i32, requester: UserId, server: ServerId) -> Result<bool> {
        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE id = $1 AND requester = $2 AND server = $3",
            self.table()
        ))
        .bind(id)
        .bind(requester)
        .bind(server)
        .execute(self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
