//! Comment aggregation - the paginated collect loop
//!
//! Pages are fetched strictly one after another. Each page is filtered by the time
//! window and only surviving comments are scored, in page order, until `limit`
//! comments are held or the source runs dry.

use crate::aggregate::cancel::CancelSignal;
use crate::aggregate::range::{is_within_range, TimeRange};
use crate::feddit::{resolve_forum_id, CommentSource, RawComment, ResourceId};
use crate::sentiment::{analyze, Classification, Sentiment, SentimentScorer};
use crate::FedditError;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A comment with its sentiment attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedComment {
    pub id: ResourceId,
    pub text: String,
    pub polarity: f64,
    pub classification: Classification,
    /// Creation time of the source comment, not part of the response body
    #[serde(skip)]
    pub created_at: i64,
}

impl EnrichedComment {
    pub fn from_raw(raw: RawComment, sentiment: Sentiment) -> Self {
        Self {
            id: raw.id,
            text: raw.text,
            polarity: sentiment.polarity,
            classification: sentiment.classification,
            created_at: raw.created_at,
        }
    }
}

/// Why the collect loop stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// `limit` comments were collected
    LimitReached,

    /// The source returned an empty page
    Exhausted,

    /// A page fetch failed; what was collected so far is returned as is
    FetchFailed { error: String },
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LimitReached => "limit-reached",
            Self::Exhausted => "exhausted",
            Self::FetchFailed { .. } => "partial-result-on-fetch-failure",
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, Self::FetchFailed { .. })
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a successful collect run
#[derive(Debug, Clone)]
pub struct Collected {
    /// Comments in retrieval order, never more than the requested limit
    pub comments: Vec<EnrichedComment>,
    pub stop: StopReason,
    pub pages_fetched: u32,
}

/// Drives paginated retrieval, filtering and scoring
///
/// Cloning is cheap; the source and scorer are shared.
#[derive(Clone)]
pub struct Aggregator {
    source: Arc<dyn CommentSource>,
    scorer: Arc<dyn SentimentScorer>,
    page_size: u32,
}

impl Aggregator {
    /// Creates an aggregator requesting `page_size` comments per call
    pub fn new(
        source: Arc<dyn CommentSource>,
        scorer: Arc<dyn SentimentScorer>,
        page_size: u32,
    ) -> Self {
        Self {
            source,
            scorer,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn source(&self) -> &dyn CommentSource {
        self.source.as_ref()
    }

    /// Collects up to `limit` in-range comments from a forum
    ///
    /// A failed page fetch ends the loop and keeps what was already collected. An
    /// empty result is an error, whatever the reason the loop stopped.
    ///
    /// # Returns
    ///
    /// * `Ok(Collected)` - At least one comment, at most `limit`
    /// * `Err(FedditError::NoMatch)` - Nothing satisfied `range`
    /// * `Err(FedditError::Cancelled)` - `cancel` fired before the loop finished
    pub async fn collect(
        &self,
        forum_id: &ResourceId,
        limit: usize,
        range: &TimeRange,
        cancel: &CancelSignal,
    ) -> Result<Collected, FedditError> {
        let mut comments: Vec<EnrichedComment> = Vec::new();
        let mut skip: u64 = 0;
        let mut pages_fetched: u32 = 0;
        let mut stop = StopReason::LimitReached;

        while comments.len() < limit {
            if cancel.is_cancelled() {
                return Err(FedditError::Cancelled);
            }

            tracing::debug!(forum = %forum_id, skip, page_size = self.page_size, "Fetching comment page");

            let page = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(FedditError::Cancelled),
                page = self.source.list_comments(forum_id, skip, self.page_size) => page,
            };

            let page = match page {
                Ok(page) => page,
                Err(e) => {
                    stop = StopReason::FetchFailed {
                        error: e.to_string(),
                    };
                    break;
                }
            };
            pages_fetched += 1;

            if page.is_empty() {
                stop = StopReason::Exhausted;
                break;
            }

            for raw in page.comments {
                if !is_within_range(&raw, range) {
                    continue;
                }
                let sentiment = analyze(self.scorer.as_ref(), &raw.text);
                comments.push(EnrichedComment::from_raw(raw, sentiment));
                if comments.len() == limit {
                    break;
                }
            }

            skip += u64::from(self.page_size);
        }

        match &stop {
            StopReason::FetchFailed { error } => tracing::warn!(
                forum = %forum_id,
                collected = comments.len(),
                pages_fetched,
                error = %error,
                "Comment page fetch failed, returning partial result ({})",
                stop
            ),
            _ => tracing::info!(
                forum = %forum_id,
                collected = comments.len(),
                pages_fetched,
                "Comment collection stopped: {}",
                stop
            ),
        }

        if comments.is_empty() {
            let forum = forum_id.to_string();
            return Err(if stop.is_partial() {
                FedditError::NoneRetrieved { forum }
            } else {
                FedditError::NoMatch { forum }
            });
        }

        comments.truncate(limit);

        Ok(Collected {
            comments,
            stop,
            pages_fetched,
        })
    }

    /// Resolves a forum by name and collects its comments
    ///
    /// This is the whole pipeline behind the comments endpoint, minus sorting.
    pub async fn comments_for_forum(
        &self,
        forum_name: &str,
        limit: usize,
        range: &TimeRange,
        cancel: &CancelSignal,
    ) -> Result<Vec<EnrichedComment>, FedditError> {
        tracing::info!(
            "Fetching comments for subfeddit '{}' (limit={})",
            forum_name,
            limit
        );

        let forum_id = resolve_forum_id(self.source.as_ref(), forum_name).await?;

        let collected = self
            .collect(&forum_id, limit, range, cancel)
            .await
            .map_err(|e| e.for_forum(forum_name))?;

        tracing::info!(
            "Retrieved {} comments from subfeddit '{}'",
            collected.comments.len(),
            forum_name
        );

        Ok(collected.comments)
    }
}
