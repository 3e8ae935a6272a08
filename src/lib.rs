//! # CyberCrawl
//!
//! Website and app-store intelligence reports, compared side by side.
//!
//! A target (a domain or an app-store link) is handed to an LLM with search
//! grounding, which researches it and answers with a JSON report. The crate
//! keeps the reports in an in-memory store, tracks recent queries, and derives
//! comparable metrics across site and app reports for charting.
//!
//! ## Layout
//!
//! - [`models`]: record shapes, result entries, history entries
//! - [`services`]: record store, history tracker, metric normalizer,
//!   comparison aggregator and the [`Dashboard`] submission handler
//! - [`gateway`]: the [`AnalysisGateway`] boundary and its Gemini client
//! - [`rendering`]: terminal cards, comparison charts and localized messages
//! - [`cli`]: `analyze`, `compare` and the interactive session
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cybercrawl::{AnalysisMode, Dashboard, GeminiClient};
//!
//! let dashboard = Dashboard::new(Arc::new(GeminiClient::new()));
//! dashboard.set_mode(AnalysisMode::Site);
//! let id = dashboard.submit(Some("example.com"))?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod cli;
pub mod config;
pub mod gateway;
pub mod models;
pub mod observability;
pub mod rendering;
pub mod services;

pub use config::CrawlConfig;
pub use gateway::{AnalysisGateway, GatewayResponse, GeminiClient};
pub use models::{
    AnalysisMode, AnalysisRecord, AppRecord, HistoryEntry, Language, ResultEntry, ResultId,
    SiteRecord, Source, TrustProfile,
};
pub use services::{
    ComparisonView, CrawlStatus, Dashboard, HistoryTracker, MetricKey, MetricSelector,
    RecordStore, normalize_rating, parse_magnitude,
};

/// Error type for cybercrawl operations.
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Empty target, unknown mode, language or metric name |
/// | `DuplicateSubmission` | The natural key is already among the results for the mode |
/// | `SubmissionInFlight` | A gateway call is still outstanding |
/// | `GatewayFailure` | Transport error, error status, or unparseable reply |
/// | `OperationFailed` | Config file, logging setup or I/O failures |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The target was already analyzed under the same mode.
    ///
    /// Raised before the gateway is invoked; nothing is mutated.
    #[error("duplicate submission: {mode} '{key}' has already been analyzed")]
    DuplicateSubmission {
        /// The mode the submission was made under.
        mode: AnalysisMode,
        /// The natural key that matched an existing result.
        key: String,
    },

    /// Another submission is still waiting on the gateway.
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    /// The analysis gateway failed.
    ///
    /// Raised when:
    /// - The HTTP request fails (timeout, connect, TLS)
    /// - The service answers with a non-success status
    /// - The reply does not parse as the expected record shape
    #[error("gateway '{operation}' failed: {cause}")]
    GatewayFailure {
        /// The gateway operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for cybercrawl operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("empty target".to_string());
        assert_eq!(err.to_string(), "invalid input: empty target");

        let err = Error::DuplicateSubmission {
            mode: AnalysisMode::Site,
            key: "example.com".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate submission: site 'example.com' has already been analyzed"
        );

        let err = Error::GatewayFailure {
            operation: "gemini_request".to_string(),
            cause: "timeout".to_string(),
        };
        assert_eq!(err.to_string(), "gateway 'gemini_request' failed: timeout");

        assert_eq!(
            Error::SubmissionInFlight.to_string(),
            "a submission is already in flight"
        );
    }
}
