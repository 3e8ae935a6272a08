//! Comparison aggregator.
//!
//! Derives chart- and table-ready projections from a list of result entries
//! of mixed kinds. Every function accepts any number of entries; an empty list
//! produces empty outputs.

use super::normalizer::{normalize_rating, parse_magnitude};
use crate::models::{AnalysisMode, AnalysisRecord, AppRecord, ResultEntry};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Placeholder for missing revenue or demographics.
pub const NOT_AVAILABLE: &str = "N/A";

/// Marker appended to a truncated region list.
pub const ELLIPSIS: &str = "...";

/// Number of regions shown before truncation.
pub const REGION_PREVIEW_LEN: usize = 3;

/// One bar group of the unified score chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePoint {
    /// Domain or app name.
    pub label: String,
    /// Sentiment score, or the normalized rating for apps.
    pub primary: f64,
    /// SEO score, or the normalized rating again for apps.
    pub secondary: f64,
    /// Kind of the originating record.
    pub kind: AnalysisMode,
}

/// One bar of the app downloads chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagnitudePoint {
    /// App name.
    pub label: String,
    /// Parsed download count.
    pub value: f64,
    /// Download text as reported, for tooltips.
    pub raw: String,
}

/// Optional app metrics that can be shown or hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKey {
    /// Download counts.
    Downloads,
    /// Estimated revenue.
    Revenue,
    /// User demographics.
    Demographics,
    /// Available countries.
    Regions,
}

impl MetricKey {
    /// Returns all metric keys.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Downloads,
            Self::Revenue,
            Self::Demographics,
            Self::Regions,
        ]
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Downloads => "downloads",
            Self::Revenue => "revenue",
            Self::Demographics => "demographics",
            Self::Regions => "regions",
        }
    }

    /// Parses a metric key.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "downloads" => Some(Self::Downloads),
            "revenue" => Some(Self::Revenue),
            "demographics" | "users" => Some(Self::Demographics),
            "regions" | "countries" => Some(Self::Regions),
            _ => None,
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::Error::InvalidInput(format!("unknown metric: {s}")))
    }
}

/// Which optional metrics are visible. All are visible by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct MetricSelector {
    /// Show downloads.
    pub downloads: bool,
    /// Show revenue.
    pub revenue: bool,
    /// Show demographics.
    pub demographics: bool,
    /// Show regions.
    pub regions: bool,
}

impl Default for MetricSelector {
    fn default() -> Self {
        Self {
            downloads: true,
            revenue: true,
            demographics: true,
            regions: true,
        }
    }
}

impl MetricSelector {
    /// Returns whether `key` is visible.
    #[must_use]
    pub const fn is_visible(&self, key: MetricKey) -> bool {
        match key {
            MetricKey::Downloads => self.downloads,
            MetricKey::Revenue => self.revenue,
            MetricKey::Demographics => self.demographics,
            MetricKey::Regions => self.regions,
        }
    }

    /// Sets the visibility of `key`.
    pub const fn set(&mut self, key: MetricKey, visible: bool) {
        match key {
            MetricKey::Downloads => self.downloads = visible,
            MetricKey::Revenue => self.revenue = visible,
            MetricKey::Demographics => self.demographics = visible,
            MetricKey::Regions => self.regions = visible,
        }
    }

    /// Flips the visibility of `key` and returns the new state.
    pub const fn toggle(&mut self, key: MetricKey) -> bool {
        let visible = !self.is_visible(key);
        self.set(key, visible);
        visible
    }

    /// Returns a copy with `key` hidden.
    #[must_use]
    pub const fn without(mut self, key: MetricKey) -> Self {
        self.set(key, false);
        self
    }
}

/// A column of the detail table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailColumn {
    /// App name, always present.
    Name,
    /// Raw download text.
    Downloads,
    /// Estimated revenue.
    Revenue,
    /// First regions, truncated.
    Regions,
    /// User demographics.
    Demographics,
}

impl DetailColumn {
    /// Metric key controlling this column; `None` for the name column.
    #[must_use]
    pub const fn metric(&self) -> Option<MetricKey> {
        match self {
            Self::Name => None,
            Self::Downloads => Some(MetricKey::Downloads),
            Self::Revenue => Some(MetricKey::Revenue),
            Self::Regions => Some(MetricKey::Regions),
            Self::Demographics => Some(MetricKey::Demographics),
        }
    }
}

/// Column order of the detail table.
const COLUMN_ORDER: [DetailColumn; 5] = [
    DetailColumn::Name,
    DetailColumn::Downloads,
    DetailColumn::Revenue,
    DetailColumn::Regions,
    DetailColumn::Demographics,
];

/// A table cell with optional full text for tooltips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailCell {
    /// Text shown in the cell.
    pub text: String,
    /// Full text behind the cell, for tooltips.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl DetailCell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tooltip: None,
        }
    }
}

/// One app row; cells line up with [`DetailTable::columns`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    /// Cells in column order.
    pub cells: Vec<DetailCell>,
}

/// App-only metric table with selectable columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailTable {
    /// Visible columns.
    pub columns: Vec<DetailColumn>,
    /// One row per app.
    pub rows: Vec<DetailRow>,
}

impl DetailTable {
    /// Returns the cell at `row` in `column`, if that column is visible.
    #[must_use]
    pub fn cell(&self, row: usize, column: DetailColumn) -> Option<&DetailCell> {
        let index = self.columns.iter().position(|c| *c == column)?;
        self.rows.get(row)?.cells.get(index)
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All comparison projections for one set of entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonView {
    /// Unified score series over every entry.
    pub scores: Vec<ScorePoint>,
    /// Download magnitudes of app entries.
    pub magnitudes: Vec<MagnitudePoint>,
    /// App detail table.
    pub table: DetailTable,
}

impl ComparisonView {
    /// Builds every projection for `entries`.
    #[must_use]
    pub fn build(entries: &[ResultEntry], selector: &MetricSelector) -> Self {
        Self {
            scores: score_series(entries),
            magnitudes: magnitude_series(entries),
            table: detail_table(entries, selector),
        }
    }

    /// Returns true if there are no entries to compare.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Builds the unified score series, one point per entry in entry order.
#[must_use]
pub fn score_series(entries: &[ResultEntry]) -> Vec<ScorePoint> {
    entries
        .iter()
        .map(|entry| match &entry.record {
            AnalysisRecord::Site(site) => ScorePoint {
                label: site.domain.clone(),
                primary: site.sentiment_score,
                secondary: site.seo_score,
                kind: AnalysisMode::Site,
            },
            AnalysisRecord::App(app) => {
                let normalized = normalize_rating(app.rating);
                ScorePoint {
                    label: app.app_name.clone(),
                    primary: normalized,
                    secondary: normalized,
                    kind: AnalysisMode::App,
                }
            },
        })
        .collect()
}

/// Builds the download magnitude series over app entries.
#[must_use]
pub fn magnitude_series(entries: &[ResultEntry]) -> Vec<MagnitudePoint> {
    apps(entries)
        .map(|app| MagnitudePoint {
            label: app.app_name.clone(),
            value: parse_magnitude(&app.downloads),
            raw: app.downloads.clone(),
        })
        .collect()
}

/// Builds the detail table over app entries.
///
/// Returns an empty table (no columns, no rows) when there are no apps.
#[must_use]
pub fn detail_table(entries: &[ResultEntry], selector: &MetricSelector) -> DetailTable {
    let rows_source: Vec<&AppRecord> = apps(entries).collect();
    if rows_source.is_empty() {
        return DetailTable::default();
    }

    let columns: Vec<DetailColumn> = COLUMN_ORDER
        .into_iter()
        .filter(|column| column.metric().is_none_or(|key| selector.is_visible(key)))
        .collect();

    let rows = rows_source
        .into_iter()
        .map(|app| DetailRow {
            cells: columns.iter().map(|column| detail_cell(app, *column)).collect(),
        })
        .collect();

    DetailTable { columns, rows }
}

fn apps(entries: &[ResultEntry]) -> impl Iterator<Item = &AppRecord> {
    entries.iter().filter_map(|entry| entry.record.as_app())
}

fn detail_cell(app: &AppRecord, column: DetailColumn) -> DetailCell {
    match column {
        DetailColumn::Name => DetailCell::plain(app.app_name.as_str()),
        DetailColumn::Downloads => DetailCell::plain(app.downloads.as_str()),
        DetailColumn::Revenue => DetailCell::plain(or_not_available(app.revenue.as_deref())),
        DetailColumn::Regions => regions_cell(&app.countries_available),
        DetailColumn::Demographics => DetailCell {
            text: or_not_available(app.user_demographics.as_deref()).to_string(),
            tooltip: app
                .user_demographics
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        },
    }
}

fn regions_cell(countries: &[String]) -> DetailCell {
    let mut text = countries
        .iter()
        .take(REGION_PREVIEW_LEN)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if countries.len() > REGION_PREVIEW_LEN {
        text.push_str(ELLIPSIS);
    }
    DetailCell {
        text,
        tooltip: (!countries.is_empty()).then(|| countries.join(", ")),
    }
}

/// Treats missing and empty text alike.
fn or_not_available(value: Option<&str>) -> &str {
    value.filter(|s| !s.is_empty()).unwrap_or(NOT_AVAILABLE)
}
