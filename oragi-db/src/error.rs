//! Error types for oragi-db
//!
//! Database faults are carried as the original `sqlx::Error` so callers can
//! inspect them; the variant only records which startup step failed.

use thiserror::Error;

use crate::models::ValidationError;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Neither a pool nor connection parameters were handed to the factory.
    #[error("either a connection pool or connection parameters must be provided")]
    MissingPoolSource,

    /// Pool creation failed at the transport or auth layer.
    #[error("failed to create connection pool: {0}")]
    Connect(#[source] sqlx::Error),

    /// A create-schema/create-table statement failed.
    #[error("failed to provision schema '{schema}': {source}")]
    Provision {
        schema: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// The underlying driver error, whichever step produced it.
    pub fn driver_error(&self) -> Option<&sqlx::Error> {
        match self {
            Self::Connect(e) | Self::Database(e) => Some(e),
            Self::Provision { source, .. } => Some(source),
            _ => None,
        }
    }

    /// True when the database rejected a row for a duplicate key.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self.driver_error(), Some(sqlx::Error::Database(db)) if db.is_unique_violation())
    }

    /// True when the database rejected a row through a CHECK constraint.
    pub fn is_check_violation(&self) -> bool {
        matches!(self.driver_error(), Some(sqlx::Error::Database(db)) if db.is_check_violation())
    }
}
