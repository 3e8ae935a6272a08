//! Analysis gateway.
//!
//! The gateway is the only part of the system that talks to the outside
//! world: given a target and a mode it asks a search-grounded LLM to research
//! the target and parses the JSON report that comes back.

mod gemini;
pub mod prompts;

pub use gemini::GeminiClient;

use crate::models::{AnalysisMode, AnalysisRecord, AppRecord, Language, SiteRecord, Source};
use crate::{Error, Result};
use std::time::Duration;

/// A parsed report plus the pages the model cited.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    /// The report.
    pub record: AnalysisRecord,
    /// Cited sources, possibly empty.
    pub sources: Vec<Source>,
}

/// Trait for analysis backends.
pub trait AnalysisGateway: Send + Sync {
    /// The backend name.
    fn name(&self) -> &'static str;

    /// Researches `target` and returns a record of the shape `mode` asks for.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GatewayFailure`] on transport errors, error statuses,
    /// or replies that do not parse as the expected JSON shape.
    fn analyze(
        &self,
        target: &str,
        mode: AnalysisMode,
        language: Language,
    ) -> Result<GatewayResponse>;
}

/// HTTP client configuration for the gateway.
#[derive(Debug, Clone, Copy)]
pub struct GatewayHttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl Default for GatewayHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 120_000,
            connect_timeout_ms: 5_000,
        }
    }
}

impl GatewayHttpConfig {
    /// Loads HTTP configuration from config file settings.
    #[must_use]
    pub fn from_config(config: &crate::config::GatewayConfig) -> Self {
        Self {
            timeout_ms: config.timeout_ms,
            connect_timeout_ms: config.connect_timeout_ms,
        }
    }
}

/// Builds a blocking HTTP client with configured timeouts.
#[must_use]
pub fn build_http_client(config: GatewayHttpConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder();
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build gateway HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}

/// Parses model output into a record of the shape `mode` asks for.
///
/// Markdown code fences around the JSON are stripped first. An empty reply
/// parses as `{}`, which yields a record with blank fields.
///
/// # Errors
///
/// Returns [`Error::GatewayFailure`] if the text is not valid JSON for the
/// record shape.
pub fn parse_record(text: &str, mode: AnalysisMode) -> Result<AnalysisRecord> {
    let json = extract_json_from_response(text);
    let json = if json.is_empty() { "{}" } else { json };

    let parsed = match mode {
        AnalysisMode::Site => serde_json::from_str::<SiteRecord>(json).map(AnalysisRecord::Site),
        AnalysisMode::App => serde_json::from_str::<AppRecord>(json).map(AnalysisRecord::App),
    };

    parsed.map_err(|e| Error::GatewayFailure {
        operation: format!("parse_{mode}_record"),
        cause: format!("Invalid JSON: {e}"),
    })
}

/// Extracts JSON from model output, handling markdown code blocks.
fn extract_json_from_response(response: &str) -> &str {
    let trimmed = response.trim();

    // ```json ... ``` blocks
    if let Some(start) = trimmed.find("```json") {
        let json_start = start + 7;
        if let Some(end) = trimmed[json_start..].find("```") {
            return trimmed[json_start..json_start + end].trim();
        }
    }

    // ``` ... ``` blocks without a language marker
    if let Some(start) = trimmed.find("```") {
        let content_start = start + 3;
        let after_marker = &trimmed[content_start..];
        let json_start = after_marker
            .find('{')
            .map_or(content_start, |pos| content_start + pos);
        if let Some(end) = trimmed[json_start..].find("```") {
            return trimmed[json_start..json_start + end].trim();
        }
    }

    // Raw JSON surrounded by prose
    if let Some(start) = trimmed.find('{') {
        if let Some(end) = trimmed.rfind('}') {
            if end > start {
                return &trimmed[start..=end];
            }
        }
    }

    trimmed
}
