//! Configuration loading for the CLI
//!
//! Priority (highest first): command-line flags and environment
//! (`DATABASE_URL`, `ORAGI_SCHEMA`), the TOML config file, built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use oragi_db::StoreConfig;
use tracing::debug;

/// Default config file location (~/.oragi/config.toml)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".oragi").join("config.toml"))
}

/// Load `.env` from the current directory (or a parent) if there is one.
/// Variables already set in the environment are not overwritten.
///
/// Runs before argument parsing so clap's `env` lookups see the values,
/// which also means before tracing is up; the caller logs the result.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Read the config file.
///
/// An explicitly requested file must exist; the default location is
/// optional.
pub fn load_file(explicit: Option<&Path>) -> Result<StoreConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(StoreConfig::default()),
        },
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let cfg = StoreConfig::from_toml_str(&text)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    debug!("Loaded configuration from {}", path.display());
    Ok(cfg)
}

/// Apply flag/environment overrides on top of the file configuration.
pub fn apply_overrides(
    mut cfg: StoreConfig,
    database_url: Option<String>,
    schema: Option<String>,
) -> StoreConfig {
    if let Some(url) = database_url {
        cfg.database_url = Some(url);
    }
    if let Some(schema) = schema {
        cfg.schema = schema;
    }
    cfg
}
