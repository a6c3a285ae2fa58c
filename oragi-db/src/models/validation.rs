//! Input rejected before it reaches the database

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Identifier longer than PostgreSQL keeps
    #[error("{field} exceeds maximum length of {max} bytes")]
    TooLong { field: &'static str, max: usize },

    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Stored code with no matching variant, e.g. an unknown medium
    #[error("invalid {field} value: '{value}'")]
    InvalidVariant { field: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        assert_eq!(
            ValidationError::Empty { field: "title" }.to_string(),
            "title cannot be empty"
        );
        assert_eq!(
            ValidationError::TooLong {
                field: "schema name",
                max: 63,
            }
            .to_string(),
            "schema name exceeds maximum length of 63 bytes"
        );
        assert_eq!(
            ValidationError::InvalidVariant {
                field: "medium",
                value: "9".into(),
            }
            .to_string(),
            "invalid medium value: '9'"
        );
    }

    #[test]
    fn converts_into_store_error() {
        let err: crate::StoreError = ValidationError::InvalidFormat {
            field: "schema name",
            reason: "bad",
        }
        .into();
        assert_eq!(err.to_string(), "invalid input: schema name: bad");
    }
}
