//! HTTP client for the Feddit API
//!
//! One `FedditClient` is built at startup and cloned into every request; the
//! underlying `reqwest::Client` pools connections and enforces the per-call timeouts.

use crate::config::FedditConfig;
use crate::feddit::types::{CommentPage, Forum, ForumList, ResourceId};
use crate::feddit::CommentSource;
use crate::FedditError;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Builds the shared HTTP client
///
/// # Arguments
///
/// * `config` - The Feddit section of the configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FedditConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Feddit API client
#[derive(Debug, Clone)]
pub struct FedditClient {
    client: Client,
    base_url: String,
}

impl FedditClient {
    /// Creates a client from configuration
    pub fn new(config: &FedditConfig) -> Result<Self, FedditError> {
        let client = build_http_client(config).map_err(|e| FedditError::SourceUnavailable {
            url: config.base_url.clone(),
            source: e,
        })?;
        Ok(Self::with_client(client, &config.base_url))
    }

    /// Wraps an existing reqwest client
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/", self.base_url, path)
    }

    /// Sends a GET and decodes the JSON body
    ///
    /// Transport failures, non-2xx statuses and undecodable bodies each map to their
    /// own error variant.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FedditError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| FedditError::SourceUnavailable {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FedditError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                FedditError::Decode {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            } else {
                FedditError::SourceUnavailable {
                    url: url.to_string(),
                    source: e,
                }
            }
        })
    }
}

#[async_trait]
impl CommentSource for FedditClient {
    async fn list_forums(&self) -> Result<Vec<Forum>, FedditError> {
        let url = self.endpoint("subfeddits");
        let list: ForumList = self.get_json(&url, &[]).await?;
        Ok(list.subfeddits)
    }

    async fn list_comments(
        &self,
        forum_id: &ResourceId,
        skip: u64,
        limit: u32,
    ) -> Result<CommentPage, FedditError> {
        let url = self.endpoint("comments");
        let query = [
            ("subfeddit_id", forum_id.to_string()),
            ("skip", skip.to_string()),
            ("limit", limit.to_string()),
        ];
        self.get_json(&url, &query).await
    }
}
