//! Configuration module for Feddit Sentiment
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A missing file is not an error: every key has a default.
//!
//! # Example
//!
//! ```no_run
//! use feddit_sentiment::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Talking to Feddit at {}", config.feddit.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CommentsConfig, Config, FedditConfig, LoggingConfig, ServerConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{validate, HARD_MAX_LIMIT};
