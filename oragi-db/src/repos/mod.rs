//! Repositories for the provisioned tables
//!
//! Each repository borrows the pool and schema of a `Storage` handle:
//! - Table references are schema-qualified and quoted
//! - Values are always bound, never spliced into SQL
//! - Constraint violations come back as `StoreError::Database`

pub mod requests;
pub mod servers;

pub use requests::RequestRepo;
pub use servers::ServerRepo;
