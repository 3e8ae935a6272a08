//! Dashboard services.
//!
//! The record store, history tracker, metric normalizer and comparison
//! aggregator are plain data structures with no I/O. [`Dashboard`] ties them
//! to an analysis gateway.

mod comparison;
mod dashboard;
mod history;
mod normalizer;
mod record_store;

pub use comparison::{
    ComparisonView, DetailCell, DetailColumn, DetailRow, DetailTable, ELLIPSIS, MagnitudePoint,
    MetricKey, MetricSelector, NOT_AVAILABLE, REGION_PREVIEW_LEN, ScorePoint, detail_table,
    magnitude_series, score_series,
};
pub use dashboard::{CrawlStatus, Dashboard, DashboardState};
pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryTracker};
pub use normalizer::{
    DEFAULT_MAX_RATING, normalize_rating, normalize_rating_with_max, parse_magnitude,
};
pub use record_store::RecordStore;
