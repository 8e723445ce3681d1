use serde::Deserialize;

/// Main configuration structure for Feddit Sentiment
///
/// Every section is optional in the TOML file; missing sections and keys take the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub feddit: FedditConfig,
    #[serde(default)]
    pub comments: CommentsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port to bind
    pub port: u16,

    /// Ceiling on a whole request, in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout_secs: 30,
        }
    }
}

/// Remote Feddit API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FedditConfig {
    /// Base URL of the Feddit API, e.g. `http://localhost:8080/api/v1`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Number of comments requested per page
    #[serde(rename = "page-size")]
    pub page_size: u32,

    /// Timeout for a single remote call (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Timeout for establishing a connection (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// User agent sent to Feddit
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FedditConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1".to_string(),
            page_size: 25,
            timeout_secs: 10,
            connect_timeout_secs: 5,
            user_agent: format!("feddit-sentiment/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Limits applied to the comments endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// Limit used when the request does not carry one
    #[serde(rename = "default-limit")]
    pub default_limit: u32,

    /// Largest limit a request may ask for
    #[serde(rename = "max-limit")]
    pub max_limit: u32,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            default_limit: 25,
            max_limit: 100,
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset
    pub level: String,

    /// One of `compact`, `pretty`, `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}
