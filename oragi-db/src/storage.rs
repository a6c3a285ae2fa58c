//! Storage handle and its factory
//!
//! A `Storage` can only be obtained through [`Storage::get_instance`] (or
//! [`Storage::from_config`]), which provisions the schema first. Any code
//! holding a handle can therefore assume both tables exist.

use sqlx::PgPool;
use tracing::{debug, error, info, info_span, Instrument, Span};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::models::SchemaName;
use crate::pool::{create_pool, ConnectParams};
use crate::repos::{RequestRepo, ServerRepo};
use crate::schema::ensure_schema;

/// Handle on the provisioned oragi schema.
///
/// The pool is shared: clones of it held elsewhere keep working after the
/// handle is dropped. Log events from the handle are recorded inside
/// `span`, which the caller supplies and keeps; provisioning runs in a
/// `provision` child span carrying the schema name.
#[derive(Debug, Clone)]
pub struct Storage {
    pool: PgPool,
    schema: SchemaName,
    span: Span,
}

impl Storage {
    /// Resolve a pool, provision `schema` on it and return the handle.
    ///
    /// At least one of `connect` or `pool` must be given. When both are,
    /// the supplied pool is used and `connect` is ignored.
    ///
    /// # Errors
    ///
    /// - [`StoreError::MissingPoolSource`] before any I/O if neither source is given
    /// - [`StoreError::Connect`] if a new pool cannot be created
    /// - [`StoreError::Provision`] if any DDL statement fails
    pub async fn get_instance(
        span: Span,
        connect: Option<&ConnectParams>,
        pool: Option<PgPool>,
        schema: SchemaName,
    ) -> Result<Self> {
        let provision_span = info_span!(parent: &span, "provision", schema = %schema);
        let pool = Self::provision(connect, pool, &schema)
            .instrument(provision_span)
            .await?;

        Ok(Self { pool, schema, span })
    }

    async fn provision(
        connect: Option<&ConnectParams>,
        pool: Option<PgPool>,
        schema: &SchemaName,
    ) -> Result<PgPool> {
        let pool = match (pool, connect) {
            (Some(pool), params) => {
                if params.is_some() {
                    debug!("pool supplied, ignoring connection parameters");
                }
                pool
            }
            (None, Some(params)) => match create_pool(params).await {
                Ok(pool) => pool,
                Err(e) => {
                    error!("{}", e);
                    return Err(StoreError::Connect(e));
                }
            },
            (None, None) => return Err(StoreError::MissingPoolSource),
        };

        info!("Connection pool ready.");
        info!("Creating tables...");

        if let Err(e) = ensure_schema(&pool, schema).await {
            error!("{}", e);
            return Err(StoreError::Provision {
                schema: schema.to_string(),
                source: e,
            });
        }

        info!("Tables created.");
        Ok(pool)
    }

    /// Build a handle from configuration, creating a new pool.
    pub async fn from_config(span: Span, config: &StoreConfig) -> Result<Self> {
        let schema = config.schema_name()?;
        let params = config.connect_params();
        Self::get_instance(span, params.as_ref(), None, schema).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn schema(&self) -> &SchemaName {
        &self.schema
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn servers(&self) -> ServerRepo<'_> {
        ServerRepo::new(&self.pool, &self.schema)
    }

    pub fn requests(&self) -> RequestRepo<'_> {
        RequestRepo::new(&self.pool, &self.schema)
    }

    /// Close the pool. Other holders of the same pool see it closed too.
    pub async fn close(&self) {
        async {
            info!("Closing connection pool.");
            self.pool.close().await;
        }
        .instrument(self.span.clone())
        .await
    }
}
