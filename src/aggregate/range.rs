use crate::feddit::RawComment;

/// Inclusive time window over comment creation timestamps
///
/// A bound of `None` means unbounded on that side; `Some(0)` is a real bound at the
/// Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl TimeRange {
    pub fn new(start: Option<i64>, end: Option<i64>) -> Self {
        Self { start, end }
    }

    /// A window that admits every timestamp
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        self.start.map_or(true, |start| timestamp >= start)
            && self.end.map_or(true, |end| timestamp <= end)
    }
}

/// Returns true if the comment was created inside `range`, both bounds inclusive
pub fn is_within_range(comment: &RawComment, range: &TimeRange) -> bool {
    range.contains(comment.created_at)
}
