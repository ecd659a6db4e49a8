//! Configuration module for chartrake
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, including the crawl budgets and the target-field alias table.
//!
//! # Example
//!
//! ```no_run
//! use chartrake::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, DateConfig, ExtractConfig, FieldSpec, OutputConfig, SeedEntry,
    UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
