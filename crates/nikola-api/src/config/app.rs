//! Application configuration for the Nikola API server.

use serde::Deserialize;

/// Key used when `NIKOLA_API_KEY` is not set.
pub const DEFAULT_API_KEY: &str = "your-local-key";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Application configuration loaded from environment variables.
///
/// Environment variables are prefixed with `NIKOLA_`:
/// - `NIKOLA_HOST`: Server bind address (default: "0.0.0.0")
/// - `NIKOLA_PORT`: Server port (default: 8000)
/// - `NIKOLA_API_KEY`: Key expected in the `X-API-KEY` header
/// - `NIKOLA_SCHEMA_PATH`: Path to the resource schema (default: "schema.json")
/// - `NIKOLA_LOG_FORMAT`: `text` or `json` (default: "text")
/// - `NIKOLA_DEBUG`: Verbose default log filter (default: false)
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Static API key for resource routes
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Resource schema file (JSON, or YAML by extension)
    #[serde(default = "default_schema_path")]
    pub schema_path: String,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,

    /// Raise the default log filter; `RUST_LOG` still wins
    #[serde(default)]
    pub debug: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_api_key() -> String {
    DEFAULT_API_KEY.to_string()
}

fn default_schema_path() -> String {
    "schema.json".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are prefixed with `NIKOLA_`.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("NIKOLA_").from_env::<AppConfig>()
    }

    /// Get the server bind address as a string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "debug,nikola_api=trace,tower_http=trace,sqlx=debug"
        } else {
            "info,nikola_api=debug,tower_http=debug"
        }
    }

    /// Whether the server still runs with the built-in development key.
    pub fn uses_default_api_key(&self) -> bool {
        self.api_key == DEFAULT_API_KEY
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_key: default_api_key(),
            schema_path: default_schema_path(),
            log_format: LogFormat::default(),
            debug: false,
        }
    }
}
