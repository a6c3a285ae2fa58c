//! Schema provisioning
//!
//! Creates the schema and its two tables if they are missing. Every
//! statement is `IF NOT EXISTS`, so running this on each startup is safe:
//! nothing is dropped, altered or populated.

use serde::Serialize;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use crate::models::{Medium, SchemaName};

/// Ordered DDL for `schema`: schema, servers table, requests table.
pub fn provisioning_statements(schema: &SchemaName) -> [String; 3] {
    let create_schema = format!("CREATE SCHEMA IF NOT EXISTS {}", schema.quoted());

    let servers = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            server BIGINT,
            expanded BOOLEAN,
            stats BOOLEAN,
            PRIMARY KEY (server)
        )
        "#,
        schema.table("servers")
    );

    let requests = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id SERIAL,
            requester BIGINT,
            server BIGINT,
            medium SMALLINT NOT NULL CHECK (medium BETWEEN {} AND {}),
            title TEXT NOT NULL CHECK (btrim(title) <> ''),
            PRIMARY KEY (id, requester, server)
        )
        "#,
        schema.table("requests"),
        Medium::ALL[0].code(),
        Medium::ALL[Medium::ALL.len() - 1].code(),
    );

    [create_schema, servers, requests]
}

/// Make sure `schema` and its tables exist.
///
/// Errors from the driver (missing privileges, unreachable server) are
/// returned as-is.
pub async fn ensure_schema(pool: &PgPool, schema: &SchemaName) -> Result<(), sqlx::Error> {
    for stmt in provisioning_statements(schema) {
        debug!(schema = %schema, "executing: {}", stmt.trim());
        sqlx::query(&stmt).execute(pool).await?;
    }
    Ok(())
}

/// Drop `schema` and everything in it.
pub async fn drop_schema(pool: &PgPool, schema: &SchemaName) -> Result<(), sqlx::Error> {
    sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", schema.quoted()))
        .execute(pool)
        .await?;
    Ok(())
}

/// A column as reported by `information_schema.columns`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
}

/// A table in a provisioned schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    pub primary_key: Vec<String>,
}

impl TableInfo {
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Describe the base tables in `schema`, sorted by name.
///
/// Columns keep their ordinal order; primary key columns keep key order.
/// A missing schema yields an empty list.
pub async fn describe_schema(
    pool: &PgPool,
    schema: &SchemaName,
) -> Result<Vec<TableInfo>, sqlx::Error> {
    let tables: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT table_name::text
        FROM information_schema.tables
        WHERE table_schema = $1 AND table_type = 'BASE TABLE'
        ORDER BY table_name
        "#,
    )
    .bind(schema.as_str())
    .fetch_all(pool)
    .await?;

    let mut out = Vec::with_capacity(tables.len());
    for (table,) in tables {
        let columns: Vec<ColumnInfo> = sqlx::query_as(
            r#"
            SELECT column_name::text AS name,
                   data_type::text AS data_type,
                   (is_nullable = 'YES') AS nullable
            FROM information_schema.columns
            WHERE table_schema = $1 AND table_name = $2
            ORDER BY ordinal_position
            "#,
        )
        .bind(schema.as_str())
        .bind(&table)
        .fetch_all(pool)
        .await?;

        let primary_key: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT kcu.column_name::text
            FROM information_schema.table_constraints tc
            JOIN information_schema.key_column_usage kcu
              ON kcu.constraint_schema = tc.constraint_schema
             AND kcu.constraint_name = tc.constraint_name
            WHERE tc.table_schema = $1
              AND tc.table_name = $2
              AND tc.constraint_type = 'PRIMARY KEY'
            ORDER BY kcu.ordinal_position
            "#,
        )
        .bind(schema.as_str())
        .bind(&table)
        .fetch_all(pool)
        .await?;

        out.push(TableInfo {
            name: table,
            columns,
            primary_key: primary_key.into_iter().map(|(c,)| c).collect(),
        });
    }

    Ok(out)
}
