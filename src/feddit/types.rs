//! Wire types for the Feddit API
//!
//! Field names follow Feddit's JSON; a subfeddit is what this crate calls a forum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a forum or comment
///
/// Feddit hands out numeric ids, but nothing here relies on that: whatever JSON
/// scalar arrives is kept and echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// A forum ("subfeddit") as listed by Feddit
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Forum {
    pub id: ResourceId,
    pub title: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `GET /subfeddits/`
#[derive(Debug, Clone, Deserialize)]
pub struct ForumList {
    #[serde(default)]
    pub subfeddits: Vec<Forum>,
}

/// A comment exactly as Feddit returns it
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawComment {
    pub id: ResourceId,
    #[serde(default)]
    pub text: String,
    /// Unix timestamp, seconds
    pub created_at: i64,
    #[serde(default, rename = "username")]
    pub author: String,
}

/// Body of `GET /comments/`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentPage {
    #[serde(default)]
    pub comments: Vec<RawComment>,
    /// Total comment count, when the server reports one
    #[serde(default)]
    pub total: Option<u64>,
}

impl CommentPage {
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}
