//! Comment aggregation module
//!
//! This module contains the core of the service:
//! - Time window filtering (`TimeRange`, `is_within_range`)
//! - The paginated collect loop with partial-result-on-fetch-failure
//! - Cooperative cancellation of in-flight runs

mod aggregator;
mod cancel;
mod range;

pub use aggregator::{Aggregator, Collected, EnrichedComment, StopReason};
pub use cancel::{CancelHandle, CancelSignal};
pub use range::{is_within_range, TimeRange};
