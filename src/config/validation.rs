use crate::config::types::{CommentsConfig, Config, FedditConfig, LoggingConfig, ServerConfig};
use crate::ConfigError;
use url::Url;

/// Largest `limit` the comments endpoint will ever honour
pub const HARD_MAX_LIMIT: u32 = 100;

const MAX_PAGE_SIZE: u32 = 1000;

const LOG_FORMATS: [&str; 3] = ["compact", "pretty", "json"];

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_server_config(&config.server)?;
    validate_feddit_config(&config.feddit)?;
    validate_comments_config(&config.comments)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.host.is_empty() {
        return Err(ConfigError::Validation("host cannot be empty".to_string()));
    }

    if config.port == 0 {
        return Err(ConfigError::Validation("port must be non-zero".to_string()));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

fn validate_feddit_config(config: &FedditConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.page_size < 1 || config.page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::Validation(format!(
            "page_size must be between 1 and {}, got {}",
            MAX_PAGE_SIZE, config.page_size
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_comments_config(config: &CommentsConfig) -> Result<(), ConfigError> {
    if config.max_limit < 1 || config.max_limit > HARD_MAX_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_limit must be between 1 and {}, got {}",
            HARD_MAX_LIMIT, config.max_limit
        )));
    }

    if config.default_limit < 1 || config.default_limit > config.max_limit {
        return Err(ConfigError::Validation(format!(
            "default_limit must be between 1 and max_limit ({}), got {}",
            config.max_limit, config.default_limit
        )));
    }

    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<(), ConfigError> {
    if !LOG_FORMATS.contains(&config.format.as_str()) {
        return Err(ConfigError::Validation(format!(
            "log format must be one of {:?}, got '{}'",
            LOG_FORMATS, config.format
        )));
    }

    Ok(())
}
