//! Domain models and validation

mod request;
mod schema_name;
mod server;
mod validation;

pub use request::{Medium, NewRequest, RequestRecord, Title, UserId};
pub use schema_name::SchemaName;
pub use server::{ServerId, ServerRecord};
pub use validation::ValidationError;
