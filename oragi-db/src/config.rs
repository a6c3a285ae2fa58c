//! Storage configuration
//!
//! Plain serde types; reading files or the environment is left to the
//! binary that embeds this crate.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::models::SchemaName;
use crate::pool::{ConnectParams, DEFAULT_MAX_CONNECTIONS};

/// Schema used when the configuration does not name one.
pub const DEFAULT_SCHEMA: &str = "discordoragi";

/// `[database]` section of the oragi configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// PostgreSQL connection string. Optional because a pool may be
    /// supplied by the host application instead.
    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_schema")]
    pub schema: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_schema() -> String {
    DEFAULT_SCHEMA.to_string()
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            schema: default_schema(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    database: StoreConfig,
}

impl StoreConfig {
    /// Parse the `[database]` table out of a TOML document.
    /// A document without that table yields the defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(s)
            .map_err(|e| StoreError::Config(format!("invalid TOML: {}", e)))?;
        Ok(file.database)
    }

    /// The configured schema name, validated.
    pub fn schema_name(&self) -> Result<SchemaName> {
        Ok(SchemaName::new(&self.schema)?)
    }

    /// Connection parameters, if a URL is configured.
    pub fn connect_params(&self) -> Option<ConnectParams> {
        self.database_url.as_ref().map(|url| {
            ConnectParams::new(url.clone())
                .max_connections(self.max_connections)
                .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = StoreConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, StoreConfig::default());
        assert_eq!(cfg.schema, "discordoragi");
        assert!(cfg.connect_params().is_none());
    }

    #[test]
    fn parses_database_section() {
        let cfg = StoreConfig::from_toml_str(
            r#"
            [database]
            database_url = "postgres://bot@db/oragi"
            schema = "test_schema"
            max_connections = 2
            "#,
        )
        .unwrap();

        assert_eq!(cfg.schema_name().unwrap().as_str(), "test_schema");
        let params = cfg.connect_params().unwrap();
        assert_eq!(params.url, "postgres://bot@db/oragi");
        assert_eq!(params.max_connections, 2);
        assert_eq!(params.acquire_timeout, Duration::from_secs(30));
    }

    #[test]
    fn invalid_schema_name_is_reported() {
        let cfg = StoreConfig {
            schema: "bad name".into(),
            ..StoreConfig::default()
        };
        assert!(matches!(cfg.schema_name(), Err(StoreError::Validation(_))));
    }

    #[test]
    fn malformed_toml() {
        let err = StoreConfig::from_toml_str("[database\n").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }
}
