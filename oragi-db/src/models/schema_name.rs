//! Schema name validation
//!
//! Schema names end up inside DDL text, so they are restricted to plain
//! lowercase PostgreSQL identifiers and quoted again when rendered.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// PostgreSQL truncates identifiers beyond NAMEDATALEN - 1 bytes.
const MAX_SCHEMA_NAME_LEN: usize = 63;

static IDENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z_][a-z0-9_]*$").expect("invalid identifier regex"));

/// Validated schema name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaName(String);

impl SchemaName {
    /// Create a new schema name, validating identifier format.
    ///
    /// # Rules
    /// - Max 63 bytes
    /// - Lowercase ASCII letters, digits, underscores
    /// - Must not start with a digit
    ///
    /// # Example
    /// ```
    /// use oragi_db::models::SchemaName;
    ///
    /// assert!(SchemaName::new("discordoragi").is_ok());
    /// assert!(SchemaName::new("Oragi").is_err());        // uppercase
    /// assert!(SchemaName::new("x; DROP TABLE y").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty {
                field: "schema name",
            });
        }

        if s.len() > MAX_SCHEMA_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "schema name",
                max: MAX_SCHEMA_NAME_LEN,
            });
        }

        if !IDENT_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "schema name",
                reason: "must be lowercase letters, digits and underscores, not starting with a digit",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Double-quoted form for splicing into SQL text.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }

    /// Schema-qualified, quoted table reference, e.g. `"oragi"."servers"`.
    pub fn table(&self, table: &str) -> String {
        format!("\"{}\".\"{}\"", self.0, table)
    }
}

impl AsRef<str> for SchemaName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for SchemaName {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
