use crate::aggregate::{Aggregator, CancelSignal};
use crate::config::Config;
use crate::feddit::CommentSource;
use crate::sentiment::SentimentScorer;
use std::sync::Arc;

/// Shared application state passed to all handlers
///
/// Built once at startup. Requests share the aggregator (and through it the one
/// HTTP client) but no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub aggregator: Aggregator,
    pub shutdown: CancelSignal,
}

impl AppState {
    pub fn new(
        config: Config,
        source: Arc<dyn CommentSource>,
        scorer: Arc<dyn SentimentScorer>,
        shutdown: CancelSignal,
    ) -> Self {
        let aggregator = Aggregator::new(source, scorer, config.feddit.page_size);
        Self {
            config: Arc::new(config),
            aggregator,
            shutdown,
        }
    }
}
