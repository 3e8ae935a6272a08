//! Data models for cybercrawl.
//!
//! Records as returned by the gateway, the entries wrapping them on the
//! dashboard, and the query history.

mod history;
mod mode;
mod record;
mod result;

pub use history::HistoryEntry;
pub use mode::{AnalysisMode, Language};
pub use record::{AnalysisRecord, AppRecord, KeyStats, Platform, SiteRecord, TrustProfile};
pub use result::{ResultEntry, ResultId, Source};
