//! Per-server feature flags

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Discord guild identifier (snowflake).
pub type ServerId = i64;

/// One configured server. A row existing at all means the server has been
/// set up; the flags toggle optional features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ServerRecord {
    pub server: ServerId,
    pub expanded: bool,
    pub stats: bool,
}

impl ServerRecord {
    /// A server with every optional feature switched off.
    pub fn new(server: ServerId) -> Self {
        Self {
            server,
            expanded: false,
            stats: false,
        }
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn with_stats(mut self, stats: bool) -> Self {
        self.stats = stats;
        self
    }
}
