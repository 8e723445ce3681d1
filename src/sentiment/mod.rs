//! Sentiment classification
//!
//! Scoring is behind the `SentimentScorer` trait; this module only turns a score
//! into the polarity/label pair attached to each comment.

mod lexicon;

pub use lexicon::LexiconScorer;

use serde::Serialize;
use std::fmt;

/// Maps text to a polarity in [-1.0, 1.0]
///
/// Implementations are pure and synchronous.
pub trait SentimentScorer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

/// Discrete sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Positive,
    Negative,
}

impl Classification {
    /// Positive iff the polarity is strictly above zero
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polarity and label for one piece of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentiment {
    pub polarity: f64,
    pub classification: Classification,
}

impl Sentiment {
    /// Result used for text with nothing to score
    pub const EMPTY: Sentiment = Sentiment {
        polarity: 0.0,
        classification: Classification::Negative,
    };
}

/// Scores `text` and classifies the result
///
/// Empty or whitespace-only text yields `Sentiment::EMPTY` without calling the scorer.
pub fn analyze<S: SentimentScorer + ?Sized>(scorer: &S, text: &str) -> Sentiment {
    if text.trim().is_empty() {
        tracing::warn!("Empty or invalid text received for sentiment analysis");
        return Sentiment::EMPTY;
    }

    let polarity = scorer.polarity(text).clamp(-1.0, 1.0);
    let classification = Classification::from_polarity(polarity);

    tracing::debug!(
        polarity,
        classification = %classification,
        "Scored comment text"
    );

    Sentiment {
        polarity,
        classification,
    }
}
