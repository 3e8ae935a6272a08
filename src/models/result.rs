//! Result entries held by the record store.

use super::{AnalysisMode, AnalysisRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a result entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultId(String);

impl ResultId {
    /// Creates a result ID from an existing string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first eight characters, for display.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ResultId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A web page the model cited while researching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Page title.
    pub title: String,
    /// Page URL.
    pub url: String,
}

/// One analysis result as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// Identifier assigned at insertion time.
    pub id: ResultId,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// The parsed report.
    pub record: AnalysisRecord,
    /// Cited sources, in no particular order.
    pub sources: Vec<Source>,
}

impl ResultEntry {
    /// Creates an entry with a fresh ID and the current time.
    #[must_use]
    pub fn new(record: AnalysisRecord, sources: Vec<Source>) -> Self {
        Self {
            id: ResultId::generate(),
            created_at: Utc::now(),
            record,
            sources,
        }
    }

    /// Returns the variant discriminator.
    #[must_use]
    pub const fn kind(&self) -> AnalysisMode {
        self.record.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SiteRecord;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ResultId::generate();
        let b = ResultId::generate();
        assert_ne!(a, b);
        assert_eq!(a.short().len(), 8);
    }

    #[test]
    fn test_short_id_of_short_string() {
        assert_eq!(ResultId::new("abc").short(), "abc");
    }

    #[test]
    fn test_entry_kind_follows_record() {
        let entry = ResultEntry::new(SiteRecord::default().into(), Vec::new());
        assert_eq!(entry.kind(), AnalysisMode::Site);
        assert!(entry.sources.is_empty());
    }
}
