//! Bounded query history.

use crate::models::{AnalysisMode, HistoryEntry};
use chrono::Utc;

/// Default number of queries kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Most-recent-first log of past queries, unique by query text.
#[derive(Debug, Clone)]
pub struct HistoryTracker {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl HistoryTracker {
    /// Creates a tracker holding up to [`DEFAULT_HISTORY_CAPACITY`] queries.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Creates a tracker with a custom bound (at least 1).
    #[must_use]
    pub const fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: if capacity == 0 { 1 } else { capacity },
        }
    }

    /// Records a query.
    ///
    /// An existing entry with the same text (case-sensitive) is dropped
    /// first, so a re-run moves the query to the front. The list is then
    /// truncated to the capacity.
    pub fn record(&mut self, query: &str, mode: AnalysisMode) {
        self.entries.retain(|entry| entry.query != query);
        self.entries.insert(
            0,
            HistoryEntry {
                query: query.to_string(),
                mode,
                timestamp: Utc::now(),
            },
        );
        self.entries.truncate(self.capacity);
    }

    /// Returns the entry at `index`, 0 being the most recent.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Returns all entries, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no query has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queries(tracker: &HistoryTracker) -> Vec<&str> {
        tracker.entries().iter().map(|e| e.query.as_str()).collect()
    }

    #[test]
    fn test_record_prepends() {
        let mut tracker = HistoryTracker::new();
        tracker.record("a.com", AnalysisMode::Site);
        tracker.record("b.com", AnalysisMode::Site);
        assert_eq!(queries(&tracker), vec!["b.com", "a.com"]);
    }

    #[test]
    fn test_eleven_queries_keep_last_ten() {
        let mut tracker = HistoryTracker::new();
        for i in 0..11 {
            tracker.record(&format!("q{i}"), AnalysisMode::Site);
        }

        assert_eq!(tracker.len(), 10);
        let expected: Vec<String> = (1..11).rev().map(|i| format!("q{i}")).collect();
        assert_eq!(queries(&tracker), expected);
    }

    #[test]
    fn test_rerecord_moves_to_front() {
        let mut tracker = HistoryTracker::new();
        tracker.record("a", AnalysisMode::Site);
        tracker.record("b", AnalysisMode::Site);
        tracker.record("c", AnalysisMode::Site);
        tracker.record("a", AnalysisMode::App);

        assert_eq!(queries(&tracker), vec!["a", "c", "b"]);
        assert_eq!(tracker.get(0).map(|e| e.mode), Some(AnalysisMode::App));
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let mut tracker = HistoryTracker::new();
        tracker.record("Example.com", AnalysisMode::Site);
        tracker.record("example.com", AnalysisMode::Site);
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut tracker = HistoryTracker::with_capacity(0);
        tracker.record("a", AnalysisMode::Site);
        tracker.record("b", AnalysisMode::Site);
        assert_eq!(tracker.capacity(), 1);
        assert_eq!(queries(&tracker), vec!["b"]);
    }
}
