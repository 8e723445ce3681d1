//! Feddit Sentiment: comment sentiment over a paginated forum API
//!
//! This crate resolves a forum by name, pages through its comments on the remote
//! Feddit API, keeps the ones inside a caller-supplied time window, scores each
//! survivor's sentiment and serves the result over a single HTTP endpoint.

pub mod aggregate;
pub mod config;
pub mod feddit;
pub mod sentiment;
pub mod server;

use thiserror::Error;

/// Main error type for Feddit Sentiment operations
#[derive(Debug, Error)]
pub enum FedditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Subfeddit '{name}' not found")]
    ForumNotFound { name: String },

    #[error("No comments found for subfeddit '{forum}' in the given time range")]
    NoMatch { forum: String },

    /// Empty result because the first comment page could not be fetched
    #[error("No comments could be retrieved for subfeddit '{forum}'")]
    NoneRetrieved { forum: String },

    #[error("Failed to reach Feddit at {url}: {source}")]
    SourceUnavailable { url: String, source: reqwest::Error },

    #[error("Feddit returned HTTP {status} for {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Malformed response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Request cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FedditError {
    /// Returns true for failures the caller caused by asking for something absent
    ///
    /// An empty result is reported as not found whatever stopped the page loop.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ForumNotFound { .. } | Self::NoMatch { .. } | Self::NoneRetrieved { .. }
        )
    }

    /// Renames the forum in an empty-result error
    fn for_forum(self, name: &str) -> Self {
        match self {
            Self::NoMatch { .. } => Self::NoMatch {
                forum: name.to_string(),
            },
            Self::NoneRetrieved { .. } => Self::NoneRetrieved {
                forum: name.to_string(),
            },
            other => other,
        }
    }
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

/// Result type alias for Feddit Sentiment operations
pub type Result<T> = std::result::Result<T, FedditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use aggregate::{Aggregator, CancelSignal, EnrichedComment, TimeRange};
pub use config::Config;
pub use feddit::{resolve_forum_id, CommentSource, FedditClient};
pub use sentiment::{analyze, Classification, LexiconScorer, Sentiment, SentimentScorer};
