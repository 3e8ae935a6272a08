//! Configuration management.
//!
//! Settings are layered: defaults, then a TOML file, then environment
//! variables, then command-line flags (applied by the binary).

use crate::models::{AnalysisMode, Language};
use crate::observability::LogFormat;
use crate::services::DEFAULT_HISTORY_CAPACITY;
use secrecy::SecretString;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration for cybercrawl.
#[derive(Debug, Clone, Default)]
pub struct CrawlConfig {
    /// Analysis gateway settings.
    pub gateway: GatewayConfig,
    /// Dashboard settings.
    pub dashboard: DashboardSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Analysis gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Model name.
    pub model: String,
    /// API endpoint.
    pub endpoint: String,
    /// API key; falls back to the environment when unset.
    pub api_key: Option<SecretString>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: None,
            temperature: 0.1,
            timeout_ms: 120_000,
            connect_timeout_ms: 5_000,
        }
    }
}

/// Dashboard behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSettings {
    /// Initial display language.
    pub language: Language,
    /// Initial analysis mode.
    pub mode: AnalysisMode,
    /// Number of recent queries kept.
    pub history_capacity: usize,
    /// How long the success status lasts before reading as idle.
    pub success_hold: Duration,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            language: Language::En,
            mode: AnalysisMode::Site,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            success_hold: Duration::from_millis(1_000),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Output format.
    pub format: LogFormat,
    /// Filter directive such as `info` or `cybercrawl=debug`.
    pub level: Option<String>,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Gateway section.
    pub gateway: Option<ConfigFileGateway>,
    /// Dashboard section.
    pub dashboard: Option<ConfigFileDashboard>,
    /// Logging section.
    pub logging: Option<ConfigFileLogging>,
}

/// `[gateway]` section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileGateway {
    /// Model name.
    pub model: Option<String>,
    /// API endpoint.
    pub endpoint: Option<String>,
    /// API key.
    pub api_key: Option<String>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

/// `[dashboard]` section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileDashboard {
    /// Display language.
    pub language: Option<String>,
    /// Initial mode.
    pub mode: Option<String>,
    /// History capacity.
    pub history_capacity: Option<usize>,
    /// Success hold in milliseconds.
    pub success_hold_ms: Option<u64>,
}

/// `[logging]` section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileLogging {
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Filter directive.
    pub level: Option<String>,
    /// Log file path.
    pub file: Option<String>,
}

impl CrawlConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it names
    /// an unknown language or mode.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid config file.
    pub fn from_toml(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Self::from_config_file(file)
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/cybercrawl/` on macOS)
    /// 2. XDG config dir (`~/.config/cybercrawl/`)
    ///
    /// Returns default configuration if no readable config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let candidates = [
            base_dirs.config_dir().join("cybercrawl").join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join("cybercrawl")
                .join("config.toml"),
        ];

        for path in candidates.iter().filter(|path| path.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Ignoring unreadable config file"
                    );
                },
            }
        }

        Self::default()
    }

    /// Applies overrides from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, which maps variable names to values.
    ///
    /// Unparseable numbers and unknown languages are ignored with a warning.
    #[must_use]
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = lookup("GEMINI_API_KEY").or_else(|| lookup("API_KEY")) {
            self.gateway.api_key = Some(SecretString::from(key));
        }
        if let Some(model) = lookup("CYBERCRAWL_MODEL") {
            self.gateway.model = model;
        }
        if let Some(endpoint) = lookup("CYBERCRAWL_ENDPOINT") {
            self.gateway.endpoint = endpoint;
        }
        if let Some(ms) =
            lookup("CYBERCRAWL_TIMEOUT_MS").and_then(|v| parse_env_u64("CYBERCRAWL_TIMEOUT_MS", &v))
        {
            self.gateway.timeout_ms = ms;
        }
        if let Some(ms) = lookup("CYBERCRAWL_CONNECT_TIMEOUT_MS")
            .and_then(|v| parse_env_u64("CYBERCRAWL_CONNECT_TIMEOUT_MS", &v))
        {
            self.gateway.connect_timeout_ms = ms;
        }
        if let Some(language) = lookup("CYBERCRAWL_LANGUAGE") {
            match Language::parse(&language) {
                Some(language) => self.dashboard.language = language,
                None => tracing::warn!(value = %language, "Ignoring unknown CYBERCRAWL_LANGUAGE"),
            }
        }
        if let Some(format) = lookup("CYBERCRAWL_LOG_FORMAT") {
            self.logging.format = LogFormat::parse(&format);
        }
        if let Some(file) = lookup("CYBERCRAWL_LOG_FILE") {
            self.logging.file = Some(PathBuf::from(file));
        }

        self
    }

    /// Converts a `ConfigFile` to `CrawlConfig`.
    fn from_config_file(file: ConfigFile) -> crate::Result<Self> {
        let mut config = Self::default();

        if let Some(gateway) = file.gateway {
            if let Some(model) = gateway.model {
                config.gateway.model = model;
            }
            if let Some(endpoint) = gateway.endpoint {
                config.gateway.endpoint = endpoint;
            }
            config.gateway.api_key = gateway
                .api_key
                .filter(|key| !key.is_empty())
                .map(SecretString::from);
            if let Some(temperature) = gateway.temperature {
                config.gateway.temperature = temperature;
            }
            if let Some(ms) = gateway.timeout_ms {
                config.gateway.timeout_ms = ms;
            }
            if let Some(ms) = gateway.connect_timeout_ms {
                config.gateway.connect_timeout_ms = ms;
            }
        }

        if let Some(dashboard) = file.dashboard {
            if let Some(language) = dashboard.language {
                config.dashboard.language = language.parse()?;
            }
            if let Some(mode) = dashboard.mode {
                config.dashboard.mode = mode.parse()?;
            }
            if let Some(capacity) = dashboard.history_capacity {
                config.dashboard.history_capacity = capacity.max(1);
            }
            if let Some(ms) = dashboard.success_hold_ms {
                config.dashboard.success_hold = Duration::from_millis(ms);
            }
        }

        if let Some(logging) = file.logging {
            if let Some(format) = logging.format {
                config.logging.format = LogFormat::parse(&format);
            }
            config.logging.level = logging.level;
            config.logging.file = logging.file.map(PathBuf::from);
        }

        Ok(config)
    }
}

fn parse_env_u64(name: &str, value: &str) -> Option<u64> {
    value
        .trim()
        .parse()
        .inspect_err(|e| tracing::warn!(variable = name, error = %e, "Ignoring invalid number"))
        .ok()
}
