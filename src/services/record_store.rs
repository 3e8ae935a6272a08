//! In-memory record store.
//!
//! Holds analysis results most-recent-first. Duplicate detection is a plain
//! exact comparison of the natural key; callers check [`RecordStore::is_duplicate`]
//! before inserting.

use crate::models::{AnalysisMode, ResultEntry, ResultId};
use tracing::instrument;

/// Ordered collection of analysis results.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    /// Entries, most recent first.
    entries: Vec<ResultEntry>,
}

impl RecordStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns true if an entry of `mode` already has `natural_key`.
    ///
    /// Site entries compare their domain, app entries their store URL. No
    /// case or whitespace normalization is applied.
    #[must_use]
    pub fn is_duplicate(&self, mode: AnalysisMode, natural_key: &str) -> bool {
        self.entries
            .iter()
            .filter(|entry| entry.kind() == mode)
            .any(|entry| entry.record.natural_key() == natural_key)
    }

    /// Prepends an entry.
    #[instrument(skip(self, entry), fields(id = %entry.id, kind = %entry.kind()))]
    pub fn insert(&mut self, entry: ResultEntry) {
        self.entries.insert(0, entry);
        tracing::debug!(len = self.entries.len(), "Result inserted");
    }

    /// Removes the entry with `id`.
    ///
    /// Returns `false`, leaving the store untouched, when no entry matches.
    pub fn remove(&mut self, id: &ResultId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.id != id);
        let removed = self.entries.len() != before;
        tracing::debug!(id = %id, removed, "Result removal");
        removed
    }

    /// Returns the entry with `id`.
    #[must_use]
    pub fn get(&self, id: &ResultId) -> Option<&ResultEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Resolves an ID prefix to a single entry ID.
    ///
    /// Returns `None` when the prefix is empty, matches nothing, or is
    /// ambiguous.
    #[must_use]
    pub fn find_by_prefix(&self, prefix: &str) -> Option<ResultId> {
        if prefix.is_empty() {
            return None;
        }
        let mut matches = self
            .entries
            .iter()
            .filter(|entry| entry.id.as_str().starts_with(prefix));
        let first = matches.next()?;
        if matches.next().is_some() {
            return None;
        }
        Some(first.id.clone())
    }

    /// Returns all entries, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
