//! Analysis modes and display languages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which kind of target a submission analyzes.
///
/// Doubles as the variant discriminator of [`super::AnalysisRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// A website, keyed by its domain.
    #[default]
    Site,
    /// A mobile app, keyed by its store URL.
    App,
}

impl AnalysisMode {
    /// Returns all modes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Site, Self::App]
    }

    /// Returns the mode as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Site => "site",
            Self::App => "app",
        }
    }

    /// Parses a mode from a string.
    ///
    /// Accepts `web` as an alias for [`Self::Site`].
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "site" | "web" | "website" => Some(Self::Site),
            "app" => Some(Self::App),
            _ => None,
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::Error::InvalidInput(format!("unknown mode: {s}")))
    }
}

/// Language for display strings and the model's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Simplified Chinese.
    Zh,
}

impl Language {
    /// Returns the language code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    /// Returns the other language.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::En => Self::Zh,
            Self::Zh => Self::En,
        }
    }

    /// Parses a language code.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Self::En),
            "zh" | "zh-cn" | "cn" | "chinese" => Some(Self::Zh),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::Error::InvalidInput(format!("unknown language: {s}")))
    }
}
