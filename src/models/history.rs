//! Query history entries.

use super::AnalysisMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A past query, re-runnable verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The query text as submitted.
    pub query: String,
    /// Mode the query ran under.
    pub mode: AnalysisMode,
    /// When the query last ran.
    pub timestamp: DateTime<Utc>,
}
