//! Chartrake: a polite daily-chart harvester
//!
//! This crate crawls a site breadth-first, locates daily result tables on
//! arbitrarily formatted pages, extracts one record per calendar day, and
//! reconciles records from multiple runs into a single date-keyed dataset.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod records;
pub mod url;

use thiserror::Error;

/// Main error type for chartrake operations
#[derive(Debug, Error)]
pub enum ChartrakeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Fetch failed for {url}: {last_cause}")]
    Fetch { url: String, last_cause: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing key column '{column}' in {path}")]
    SchemaMismatch { column: String, path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for chartrake operations
pub type Result<T> = std::result::Result<T, ChartrakeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use records::{Dataset, FieldValue, Record};
pub use url::{extract_host, in_scope, normalize_url};
