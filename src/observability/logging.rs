//! Logging configuration.

use crate::config::LoggingSettings;
use tracing_subscriber::EnvFilter;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, multi-line.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name, defaulting to pretty.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }

    /// Returns the format as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Event filter.
    pub filter: EnvFilter,
    /// Output format.
    pub format: LogFormat,
    /// Optional log file; stderr when unset.
    pub file: Option<std::path::PathBuf>,
}

impl LoggingConfig {
    /// Default filter directive.
    pub const DEFAULT_LEVEL: &'static str = "warn";

    /// Builds the logging configuration.
    ///
    /// The filter comes from `CYBERCRAWL_LOG`, then `RUST_LOG`, then the
    /// configured level. `verbose` overrides all of them with `debug`.
    #[must_use]
    pub fn from_settings(settings: &LoggingSettings, verbose: bool) -> Self {
        let directive = if verbose {
            "debug".to_string()
        } else {
            std::env::var("CYBERCRAWL_LOG")
                .or_else(|_| std::env::var("RUST_LOG"))
                .ok()
                .or_else(|| settings.level.clone())
                .unwrap_or_else(|| Self::DEFAULT_LEVEL.to_string())
        };

        Self {
            filter: build_filter(&directive),
            format: settings.format,
            file: settings.file.clone(),
        }
    }
}

fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        tracing::warn!(directive, error = %e, "Invalid log filter, using default");
        EnvFilter::new(LoggingConfig::DEFAULT_LEVEL)
    })
}
