//! Database configuration for the SQLite store.

use serde::Deserialize;
use sqlx::sqlite::SqliteConnectOptions;

/// Database configuration loaded from environment variables.
///
/// Environment variables are prefixed with `DB_`:
/// - `DB_PATH`: SQLite database file (default: "app.db")
/// - `DB_MAX_CONNECTIONS`: Pool ceiling (default: 5)
/// - `DB_MIN_CONNECTIONS`: Pool floor (default: 1)
/// - `DB_ACQUIRE_TIMEOUT`: Seconds to wait for a connection (default: 30)
/// - `DB_CREATE_IF_MISSING`: Create the file when absent (default: true)
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database file path
    #[serde(default = "default_path")]
    pub path: String,

    /// Maximum connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout: u64,

    /// Create the database file if it does not exist
    #[serde(default = "default_true")]
    pub create_if_missing: bool,
}

fn default_path() -> String {
    "app.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl DatabaseConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are prefixed with `DB_`.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("DB_").from_env::<DatabaseConfig>()
    }

    /// Configuration pointing at a specific file, other settings default.
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Get SQLite connection options.
    pub fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(self.create_if_missing)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            acquire_timeout: default_acquire_timeout(),
            create_if_missing: true,
        }
    }
}
