//! Feddit source module
//!
//! This module contains everything that talks to the remote Feddit API:
//! - Wire types for forums and comments
//! - The `CommentSource` trait the aggregator pages through
//! - A reqwest-backed client sharing one connection pool
//! - Forum name resolution

mod client;
mod resolver;
mod types;

pub use client::{build_http_client, FedditClient};
pub use resolver::resolve_forum_id;
pub use types::{CommentPage, Forum, ForumList, RawComment, ResourceId};

use crate::FedditError;
use async_trait::async_trait;

/// A paginated source of forums and comments
///
/// Implementations must be cheap to share between concurrent requests; they are
/// read-only from the caller's point of view.
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Lists every forum, unpaginated
    async fn list_forums(&self) -> Result<Vec<Forum>, FedditError>;

    /// Fetches one page of comments for a forum
    ///
    /// # Arguments
    ///
    /// * `forum_id` - Id returned by `list_forums`
    /// * `skip` - Number of comments to skip
    /// * `limit` - Page size
    async fn list_comments(
        &self,
        forum_id: &ResourceId,
        skip: u64,
        limit: u32,
    ) -> Result<CommentPage, FedditError>;
}
