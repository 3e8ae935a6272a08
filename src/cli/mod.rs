//! CLI command implementations.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `analyze` | Analyze one website or app and print its card |
//! | `compare` | Analyze several targets and print the comparison |
//! | `session` | Interactive dashboard over stdin/stdout |
//!
//! # Example Usage
//!
//! ```bash
//! # Analyze a website
//! cybercrawl analyze example.com
//!
//! # Analyze an app listing in Chinese, as JSON
//! cybercrawl --lang zh analyze --mode app https://apps.apple.com/us/app/id123 --format json
//!
//! # Compare a site and two apps without the revenue column
//! cybercrawl compare --site example.com --app notes --app chat --hide revenue
//! ```

mod analyze;
mod compare;
mod session;

pub use analyze::cmd_analyze;
pub use compare::{CompareTargets, cmd_compare};
pub use session::{SessionCommand, run_session};

use crate::Error;
use std::io;
use std::str::FromStr;

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable cards and charts.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "table" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(Error::InvalidInput(format!("unknown output format: {other}"))),
        }
    }
}

/// Text to show the user for a failed submission.
///
/// Duplicate and gateway failures use the dashboard banner; other errors
/// are shown as they are.
pub(crate) fn failure_banner(dashboard: &crate::services::Dashboard, error: &Error) -> String {
    match error {
        Error::DuplicateSubmission { .. } | Error::GatewayFailure { .. } => dashboard
            .error_message()
            .unwrap_or_else(|| error.to_string()),
        other => other.to_string(),
    }
}

/// Converts a write failure on the output stream.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn write_error(e: io::Error) -> Error {
    Error::OperationFailed {
        operation: "write_output".to_string(),
        cause: e.to_string(),
    }
}

/// Converts a JSON serialization failure.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn json_error(e: serde_json::Error) -> Error {
    Error::OperationFailed {
        operation: "serialize_json".to_string(),
        cause: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
