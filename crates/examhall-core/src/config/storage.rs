//! Storage backend selection.

use serde::{Deserialize, Serialize};

/// Which repository implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// PostgreSQL through the sqlx pool.
    #[default]
    Postgres,
    /// Process-local tables, lost on restart.
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend used for registrations, rooms, staff and allotments.
    #[serde(default)]
    pub backend: StorageBackend,
    /// JSON file loaded into the `memory` backend at startup.
    #[serde(default)]
    pub seed_file: Option<String>,
}
