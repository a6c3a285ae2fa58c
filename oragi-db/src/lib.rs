//! PostgreSQL storage for the oragi request tracker
//!
//! Records which servers (guilds) have enabled optional features and the
//! title requests users make in them. The crate's job is startup
//! sequencing: obtain a pool, make sure the schema and tables exist, then
//! hand out a [`Storage`] handle the rest of the bot queries through.
//!
//! ```ignore
//! let params = ConnectParams::new("postgres://localhost/oragi");
//! let schema = SchemaName::new(DEFAULT_SCHEMA)?;
//! let storage = Storage::get_instance(tracing::info_span!("db"), Some(&params), None, schema).await?;
//! storage.servers().upsert(ServerRecord::new(guild_id)).await?;
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod pool;
pub mod repos;
pub mod schema;
pub mod storage;

pub use config::{StoreConfig, DEFAULT_SCHEMA};
pub use error::{Result, StoreError};
pub use models::{Medium, NewRequest, RequestRecord, SchemaName, ServerRecord, Title};
pub use pool::{create_pool, ConnectParams};
pub use schema::{describe_schema, drop_schema, ensure_schema, ColumnInfo, TableInfo};
pub use storage::Storage;

pub use sqlx::PgPool;
