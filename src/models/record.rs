//! Analysis record shapes returned by the gateway.
//!
//! Field names on the wire are the camelCase keys the model is asked to
//! produce. Every struct deserializes with `#[serde(default)]`, and an
//! explicit `null` reads as the field's default, so a reply that omits or
//! nulls out fields still yields a record with blank values. Only type
//! mismatches fail to parse.

use super::AnalysisMode;
use serde::{Deserialize, Deserializer, Serialize};

/// Reads `null` as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Trust and compliance details shared by both record variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrustProfile {
    /// Whether the target serves Mainland China.
    #[serde(deserialize_with = "null_as_default")]
    pub serves_china: bool,
    /// Evidence for the China availability verdict (ICP license, Alipay, store region).
    #[serde(deserialize_with = "null_as_default")]
    pub china_service_details: String,
    /// Whether users in China can register or log in.
    #[serde(deserialize_with = "null_as_default")]
    pub china_auth_available: bool,
    /// Details on China registration (+86 numbers, WeChat login).
    #[serde(deserialize_with = "null_as_default")]
    pub china_auth_details: String,
    /// Board of directors or key executives.
    #[serde(deserialize_with = "null_as_default")]
    pub board_members: Vec<String>,
    /// Whether stablecoin payments are accepted.
    #[serde(deserialize_with = "null_as_default")]
    pub stablecoin_payment: bool,
    /// Details on crypto payment support.
    #[serde(deserialize_with = "null_as_default")]
    pub stablecoin_details: String,
}

/// Traffic and publishing cadence estimates for a site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyStats {
    /// `Low`, `Medium`, `High` or `Very High`.
    #[serde(deserialize_with = "null_as_default")]
    pub estimated_traffic_tier: String,
    /// `Daily`, `Weekly`, `Monthly` or `Static`.
    #[serde(deserialize_with = "null_as_default")]
    pub content_frequency: String,
}

/// Report on a website.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteRecord {
    /// The analyzed domain; the natural key of site records.
    #[serde(deserialize_with = "null_as_default")]
    pub domain: String,
    /// Official site name.
    #[serde(deserialize_with = "null_as_default")]
    pub site_name: String,
    /// Short summary.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Main topics covered.
    #[serde(deserialize_with = "null_as_default")]
    pub main_topics: Vec<String>,
    /// Who the site is for.
    #[serde(deserialize_with = "null_as_default")]
    pub target_audience: String,
    /// Brand reputation, 0 to 100.
    #[serde(deserialize_with = "null_as_default")]
    pub sentiment_score: f64,
    /// Technical SEO health, 0 to 100.
    #[serde(deserialize_with = "null_as_default")]
    pub seo_score: f64,
    /// Detected technologies.
    #[serde(deserialize_with = "null_as_default")]
    pub tech_stack: Vec<String>,
    /// Free-form tags.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Social profile links.
    #[serde(deserialize_with = "null_as_default")]
    pub social_links: Vec<String>,
    /// Emails, phone numbers.
    #[serde(deserialize_with = "null_as_default")]
    pub contact_info: Vec<String>,
    /// Traffic and cadence estimates.
    #[serde(deserialize_with = "null_as_default")]
    pub key_stats: KeyStats,
    /// Trust and compliance details.
    #[serde(flatten)]
    pub trust: TrustProfile,
}

/// Store platform of an app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Platform {
    /// Apple App Store.
    #[serde(rename = "iOS", alias = "ios", alias = "IOS")]
    Ios,
    /// Google Play.
    #[serde(alias = "android")]
    Android,
    /// Both stores.
    #[serde(rename = "Cross-Platform", alias = "cross-platform")]
    CrossPlatform,
    /// Missing or outside the known set.
    #[default]
    #[serde(other)]
    Unknown,
}

impl Platform {
    /// Returns the display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "iOS",
            Self::Android => "Android",
            Self::CrossPlatform => "Cross-Platform",
            Self::Unknown => "Unknown",
        }
    }
}

/// Report on a mobile app.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppRecord {
    /// App name.
    #[serde(deserialize_with = "null_as_default")]
    pub app_name: String,
    /// Store link; the natural key of app records.
    #[serde(deserialize_with = "null_as_default")]
    pub store_url: String,
    /// Store platform.
    #[serde(deserialize_with = "null_as_default")]
    pub platform: Platform,
    /// Developer or publisher.
    #[serde(deserialize_with = "null_as_default")]
    pub developer: String,
    /// Store category.
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    /// Store rating, 0.0 to 5.0.
    pub rating: Option<f64>,
    /// Approximate download count such as `10M+`.
    #[serde(deserialize_with = "null_as_default")]
    pub downloads: String,
    /// Estimated revenue such as `$500k/mo`.
    pub revenue: Option<String>,
    /// User demographics.
    pub user_demographics: Option<String>,
    /// Price text.
    #[serde(deserialize_with = "null_as_default")]
    pub price: String,
    /// Countries or regions where the app is available.
    #[serde(deserialize_with = "null_as_default")]
    pub countries_available: Vec<String>,
    /// Short description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Free-form tags.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Last update text.
    #[serde(deserialize_with = "null_as_default")]
    pub last_updated: String,
    /// Trust and compliance details.
    #[serde(flatten)]
    pub trust: TrustProfile,
}

/// A parsed analysis of either a site or an app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnalysisRecord {
    /// Website report.
    Site(SiteRecord),
    /// App report.
    App(AppRecord),
}

impl AnalysisRecord {
    /// Returns the variant discriminator.
    #[must_use]
    pub const fn kind(&self) -> AnalysisMode {
        match self {
            Self::Site(_) => AnalysisMode::Site,
            Self::App(_) => AnalysisMode::App,
        }
    }

    /// Returns the label used in charts: the domain or the app name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Site(site) => &site.domain,
            Self::App(app) => &app.app_name,
        }
    }

    /// Returns the field used for duplicate detection.
    #[must_use]
    pub fn natural_key(&self) -> &str {
        match self {
            Self::Site(site) => &site.domain,
            Self::App(app) => &app.store_url,
        }
    }

    /// Returns the shared trust details.
    #[must_use]
    pub const fn trust(&self) -> &TrustProfile {
        match self {
            Self::Site(site) => &site.trust,
            Self::App(app) => &app.trust,
        }
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Site(site) => &site.description,
            Self::App(app) => &app.description,
        }
    }

    /// Returns the tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        match self {
            Self::Site(site) => &site.tags,
            Self::App(app) => &app.tags,
        }
    }

    /// Returns the app record, if this is one.
    #[must_use]
    pub const fn as_app(&self) -> Option<&AppRecord> {
        match self {
            Self::App(app) => Some(app),
            Self::Site(_) => None,
        }
    }

    /// Returns the site record, if this is one.
    #[must_use]
    pub const fn as_site(&self) -> Option<&SiteRecord> {
        match self {
            Self::Site(site) => Some(site),
            Self::App(_) => None,
        }
    }
}

impl From<SiteRecord> for AnalysisRecord {
    fn from(site: SiteRecord) -> Self {
        Self::Site(site)
    }
}

impl From<AppRecord> for AnalysisRecord {
    fn from(app: AppRecord) -> Self {
        Self::App(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_record_from_model_json() {
        let json = r#"{
            "domain": "example.com",
            "siteName": "Example",
            "description": "A demo site.",
            "mainTopics": ["demos"],
            "targetAudience": "developers",
            "sentimentScore": 85,
            "seoScore": 90,
            "techStack": ["React"],
            "tags": ["demo"],
            "socialLinks": [],
            "contactInfo": ["hello@example.com"],
            "keyStats": {"estimatedTrafficTier": "High", "contentFrequency": "Weekly"},
            "servesChina": true,
            "chinaServiceDetails": "Has ICP license.",
            "chinaAuthAvailable": false,
            "chinaAuthDetails": "No +86 support.",
            "boardMembers": ["Jane Doe (CEO)"],
            "stablecoinPayment": false,
            "stablecoinDetails": ""
        }"#;

        let site: SiteRecord = serde_json::from_str(json).unwrap();
        assert_eq!(site.domain, "example.com");
        assert!((site.sentiment_score - 85.0).abs() < f64::EPSILON);
        assert_eq!(site.key_stats.estimated_traffic_tier, "High");
        assert!(site.trust.serves_china);
        assert!(!site.trust.china_auth_available);
        assert_eq!(site.trust.board_members, vec!["Jane Doe (CEO)"]);
    }

    #[test]
    fn test_app_record_missing_fields_default() {
        let app: AppRecord = serde_json::from_str(r#"{"appName": "Notes"}"#).unwrap();
        assert_eq!(app.app_name, "Notes");
        assert_eq!(app.rating, None);
        assert_eq!(app.revenue, None);
        assert_eq!(app.platform, Platform::Unknown);
        assert!(app.countries_available.is_empty());
        assert_eq!(app.trust, TrustProfile::default());
    }

    #[test]
    fn test_site_record_null_fields_default() {
        let json = r#"{
            "domain": "example.com",
            "description": null,
            "mainTopics": null,
            "sentimentScore": null,
            "seoScore": 72,
            "keyStats": null,
            "servesChina": null,
            "boardMembers": null,
            "stablecoinDetails": null
        }"#;

        let site: SiteRecord = serde_json::from_str(json).unwrap();
        assert_eq!(site.domain, "example.com");
        assert!(site.description.is_empty());
        assert!(site.main_topics.is_empty());
        assert!(site.sentiment_score.abs() < f64::EPSILON);
        assert!((site.seo_score - 72.0).abs() < f64::EPSILON);
        assert_eq!(site.key_stats, KeyStats::default());
        assert!(!site.trust.serves_china);
        assert!(site.trust.board_members.is_empty());
    }

    #[test]
    fn test_app_record_null_fields_default() {
        let json = r#"{
            "appName": "Notes",
            "platform": null,
            "rating": null,
            "downloads": null,
            "revenue": null,
            "countriesAvailable": null,
            "chinaAuthAvailable": null
        }"#;

        let app: AppRecord = serde_json::from_str(json).unwrap();
        assert_eq!(app.app_name, "Notes");
        assert_eq!(app.platform, Platform::Unknown);
        assert_eq!(app.rating, None);
        assert!(app.downloads.is_empty());
        assert_eq!(app.revenue, None);
        assert!(app.countries_available.is_empty());
        assert!(!app.trust.china_auth_available);
    }

    #[test]
    fn test_app_record_wrong_type_fails() {
        let result = serde_json::from_str::<AppRecord>(r#"{"countriesAvailable": "USA"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_platform_values() {
        let parse = |s: &str| serde_json::from_str::<Platform>(&format!("\"{s}\"")).unwrap();
        assert_eq!(parse("iOS"), Platform::Ios);
        assert_eq!(parse("Android"), Platform::Android);
        assert_eq!(parse("Cross-Platform"), Platform::CrossPlatform);
        assert_eq!(parse("Web"), Platform::Unknown);
    }

    #[test]
    fn test_record_accessors() {
        let site = AnalysisRecord::from(SiteRecord {
            domain: "example.com".to_string(),
            ..SiteRecord::default()
        });
        assert_eq!(site.kind(), AnalysisMode::Site);
        assert_eq!(site.display_name(), "example.com");
        assert_eq!(site.natural_key(), "example.com");
        assert!(site.as_app().is_none());

        let app = AnalysisRecord::from(AppRecord {
            app_name: "Notes".to_string(),
            store_url: "https://apps.apple.com/app/id1".to_string(),
            ..AppRecord::default()
        });
        assert_eq!(app.kind(), AnalysisMode::App);
        assert_eq!(app.display_name(), "Notes");
        assert_eq!(app.natural_key(), "https://apps.apple.com/app/id1");
        assert!(app.as_site().is_none());
    }

    #[test]
    fn test_record_serializes_with_kind_tag() {
        let record = AnalysisRecord::from(AppRecord::default());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["kind"], "app");
        assert!(value.get("servesChina").is_some());
    }
}
