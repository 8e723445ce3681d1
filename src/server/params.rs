//! Query parameters of the comments endpoint
//!
//! Parameters arrive as raw strings so that every parse failure can be reported
//! as a 422 with a readable `detail`.

use crate::aggregate::{EnrichedComment, TimeRange};
use crate::config::CommentsConfig;
use crate::server::error::ApiError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Raw query string of `GET /comments/{forum_name}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentsParams {
    pub limit: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub sort_by_polarity_score: Option<String>,
}

/// Output ordering by polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Validated comments request
#[derive(Debug, Clone, PartialEq)]
pub struct CommentsQuery {
    pub limit: usize,
    pub range: TimeRange,
    pub sort: Option<SortOrder>,
}

impl CommentsParams {
    /// Checks every parameter against the configured limits
    pub fn validate(&self, limits: &CommentsConfig) -> Result<CommentsQuery, ApiError> {
        let limit = match non_empty(&self.limit) {
            None => limits.default_limit,
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|l| (1..=limits.max_limit).contains(l))
                .ok_or_else(|| {
                    ApiError::InvalidQuery(format!(
                        "limit must be an integer between 1 and {}, got '{}'",
                        limits.max_limit, raw
                    ))
                })?,
        };

        let start = non_empty(&self.start)
            .map(|raw| parse_bound("start", raw))
            .transpose()?;
        let end = non_empty(&self.end)
            .map(|raw| parse_bound("end", raw))
            .transpose()?;

        let sort = non_empty(&self.sort_by_polarity_score)
            .map(|raw| {
                SortOrder::parse(raw).ok_or_else(|| {
                    ApiError::InvalidQuery(format!(
                        "sort_by_polarity_score must be 'asc' or 'desc', got '{}'",
                        raw
                    ))
                })
            })
            .transpose()?;

        Ok(CommentsQuery {
            limit: limit as usize,
            range: TimeRange::new(start, end),
            sort,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_bound(name: &str, raw: &str) -> Result<i64, ApiError> {
    parse_timestamp(raw).ok_or_else(|| {
        ApiError::InvalidQuery(format!(
            "{} must be an ISO 8601 datetime, got '{}'",
            name, raw
        ))
    })
}

/// Parses a datetime into whole Unix seconds
///
/// Accepts RFC 3339, naive ISO 8601 datetimes and plain dates (both taken as UTC),
/// and integer Unix seconds. A `+` in an offset often arrives URL-decoded as a space,
/// so that spelling is accepted too.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();

    if let Ok(seconds) = raw.parse::<i64>() {
        return Some(seconds);
    }

    // Only the last space can be a decoded offset sign
    let repaired = raw
        .rsplit_once(' ')
        .map(|(head, offset)| format!("{}+{}", head, offset));
    for candidate in std::iter::once(raw).chain(repaired.as_deref()) {
        if let Ok(dt) = DateTime::parse_from_rfc3339(candidate) {
            return Some(dt.timestamp());
        }
        for format in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(candidate, format) {
                return Some(dt.timestamp());
            }
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().timestamp());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp())
}

/// Reorders comments by polarity
///
/// The sort is stable; equal polarities keep their retrieval order.
pub fn sort_by_polarity(comments: &mut [EnrichedComment], order: SortOrder) {
    match order {
        SortOrder::Asc => comments.sort_by(|a, b| a.polarity.total_cmp(&b.polarity)),
        SortOrder::Desc => comments.sort_by(|a, b| b.polarity.total_cmp(&a.polarity)),
    }
}
