//! Google Gemini client with Google Search grounding.

use super::{
    AnalysisGateway, GatewayHttpConfig, GatewayResponse, build_http_client, parse_record, prompts,
};
use crate::models::{AnalysisMode, Language, Source};
use crate::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Gemini analysis client.
pub struct GeminiClient {
    /// API key.
    api_key: Option<SecretString>,
    /// API endpoint.
    endpoint: String,
    /// Model to use.
    model: String,
    /// Sampling temperature.
    temperature: f32,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl GeminiClient {
    /// Default API endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://generativelanguage.googleapis.com/v1beta";

    /// Default model.
    pub const DEFAULT_MODEL: &'static str = "gemini-2.5-flash";

    /// Default temperature; low so reports stay factual.
    pub const DEFAULT_TEMPERATURE: f32 = 0.1;

    /// Creates a client, reading the key from `GEMINI_API_KEY` or `API_KEY`.
    #[must_use]
    pub fn new() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|key| !key.is_empty())
            .map(SecretString::from);
        Self {
            api_key,
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
            temperature: Self::DEFAULT_TEMPERATURE,
            client: build_http_client(GatewayHttpConfig::default()),
        }
    }

    /// Creates a client from configuration.
    #[must_use]
    pub fn from_config(config: &crate::config::GatewayConfig) -> Self {
        let mut client = Self::new()
            .with_endpoint(&config.endpoint)
            .with_model(&config.model)
            .with_temperature(config.temperature)
            .with_http_config(GatewayHttpConfig::from_config(config));
        if let Some(ref key) = config.api_key {
            client.api_key = Some(key.clone());
        }
        client
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Sets the API endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets HTTP client timeouts.
    #[must_use]
    pub fn with_http_config(mut self, config: GatewayHttpConfig) -> Self {
        self.client = build_http_client(config);
        self
    }

    /// Returns the configured model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Checks that an API key is configured and well formed.
    ///
    /// Keys are URL-safe tokens; anything with whitespace or control
    /// characters is rejected before a request is made.
    fn validate(&self) -> Result<&SecretString> {
        let key = self.api_key.as_ref().ok_or_else(|| Error::GatewayFailure {
            operation: "gemini_request".to_string(),
            cause: "GEMINI_API_KEY not set".to_string(),
        })?;

        if !Self::is_valid_api_key_format(key.expose_secret()) {
            return Err(Error::GatewayFailure {
                operation: "gemini_request".to_string(),
                cause: "Invalid API key format".to_string(),
            });
        }

        Ok(key)
    }

    fn is_valid_api_key_format(key: &str) -> bool {
        !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    /// Sends a grounded `generateContent` request and returns the reply.
    fn generate(&self, prompt: &str) -> Result<GenerateContentResponse> {
        let api_key = self.validate()?;

        tracing::info!(provider = "gemini", model = %self.model, "Making gateway request");

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.endpoint, self.model
            ))
            .header("x-goog-api-key", api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .map_err(|e| {
                let error_kind = if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() {
                    "connect"
                } else if e.is_request() {
                    "request"
                } else {
                    "unknown"
                };
                tracing::error!(
                    provider = "gemini",
                    model = %self.model,
                    error = %e,
                    error_kind = error_kind,
                    "Gateway request failed"
                );
                Error::GatewayFailure {
                    operation: "gemini_request".to_string(),
                    cause: format!("{error_kind} error: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            tracing::error!(
                provider = "gemini",
                model = %self.model,
                status = %status,
                body = %body,
                "Gateway returned error status"
            );
            return Err(Error::GatewayFailure {
                operation: "gemini_request".to_string(),
                cause: format!("API returned status: {status} - {body}"),
            });
        }

        response.json().map_err(|e| {
            tracing::error!(
                provider = "gemini",
                model = %self.model,
                error = %e,
                "Failed to parse gateway response"
            );
            Error::GatewayFailure {
                operation: "gemini_response".to_string(),
                cause: e.to_string(),
            }
        })
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisGateway for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn analyze(
        &self,
        target: &str,
        mode: AnalysisMode,
        language: Language,
    ) -> Result<GatewayResponse> {
        let started = Instant::now();
        let prompt = prompts::build_prompt(target, mode, language);
        let response = self.generate(&prompt)?;

        let text = response.text();
        let record = parse_record(&text, mode).inspect_err(|e| {
            tracing::warn!(
                provider = "gemini",
                mode = %mode,
                error = %e,
                "Model reply did not match the record shape"
            );
        })?;
        let sources = response.sources();

        tracing::info!(
            provider = "gemini",
            mode = %mode,
            sources = sources.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Analysis complete"
        );

        Ok(GatewayResponse { record, sources })
    }
}

/// Request to the `generateContent` API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    tools: Vec<Tool>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: String,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

/// Enables Google Search grounding.
#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

/// Response from the `generateContent` API.
#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// Web sources from the first candidate's grounding metadata.
    fn sources(&self) -> Vec<Source> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.grounding_metadata.as_ref())
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .map(|web| Source {
                        title: web.title.clone(),
                        url: web.uri.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    #[serde(default)]
    uri: String,
    #[serde(default)]
    title: String,
}
