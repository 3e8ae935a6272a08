//! Terminal charts and the detail table for the comparison view.

use super::Messages;
use crate::services::{
    ComparisonView, DetailColumn, DetailTable, MagnitudePoint, MetricSelector, ScorePoint,
};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

/// Width of a full bar in characters.
pub const BAR_WIDTH: usize = 20;

const FILLED: char = '█';
const EMPTY: char = '░';

/// Writes the comparison: score chart, downloads chart, detail table.
///
/// The downloads chart is drawn only while the downloads metric is visible.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_comparison<W: Write>(
    writer: &mut W,
    view: &ComparisonView,
    selector: &MetricSelector,
    messages: &Messages,
) -> io::Result<()> {
    writeln!(writer, "== {} ==", messages.comparison)?;
    write_scores(writer, &view.scores, messages)?;

    if selector.downloads && !view.magnitudes.is_empty() {
        writeln!(writer)?;
        write_magnitudes(writer, &view.magnitudes, messages)?;
    }

    if !view.table.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "{}", messages.detailed_metrics)?;
        write_table(writer, &view.table, messages)?;
    }

    Ok(())
}

fn write_scores<W: Write>(
    writer: &mut W,
    scores: &[ScorePoint],
    messages: &Messages,
) -> io::Result<()> {
    writeln!(writer, "{}", messages.market_strength)?;
    let width = label_width(scores.iter().map(|p| p.label.as_str()));
    for point in scores {
        writeln!(
            writer,
            "  {}  {:<4}  {} {:>3.0}  {} {:>3.0}",
            pad(&point.label, width),
            point.kind.as_str(),
            bar(point.primary, 100.0),
            point.primary,
            bar(point.secondary, 100.0),
            point.secondary
        )?;
    }
    writeln!(writer, "  {}", messages.normalized_note)
}

fn write_magnitudes<W: Write>(
    writer: &mut W,
    magnitudes: &[MagnitudePoint],
    messages: &Messages,
) -> io::Result<()> {
    writeln!(writer, "{}", messages.app_performance)?;
    let max = magnitudes.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    let width = label_width(magnitudes.iter().map(|p| p.label.as_str()));
    for point in magnitudes {
        writeln!(
            writer,
            "  {}  {} {}",
            pad(&point.label, width),
            bar(point.value, max),
            point.raw
        )?;
    }
    Ok(())
}

fn write_table<W: Write>(
    writer: &mut W,
    table: &DetailTable,
    messages: &Messages,
) -> io::Result<()> {
    let headers: Vec<&str> = table
        .columns
        .iter()
        .map(|column| column_label(*column, messages))
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.cells.get(i))
                .map(|cell| display_width(&cell.text))
                .chain(std::iter::once(display_width(header)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(header, *width))
        .collect();
    writeln!(writer, "  {}", header_line.join(" | ").trim_end())?;

    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    writeln!(writer, "  {}", rule.join("-+-"))?;

    for row in &table.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(&cell.text, *width))
            .collect();
        writeln!(writer, "  {}", cells.join(" | ").trim_end())?;
    }
    Ok(())
}

const fn column_label(column: DetailColumn, messages: &Messages) -> &'static str {
    match column {
        DetailColumn::Name => messages.col_name,
        DetailColumn::Downloads => messages.col_downloads,
        DetailColumn::Revenue => messages.col_revenue,
        DetailColumn::Regions => messages.col_regions,
        DetailColumn::Demographics => messages.col_demographics,
    }
}

/// Renders `value` out of `max` as a fixed-width bar.
fn bar(value: f64, max: f64) -> String {
    let ratio = if max > 0.0 && value.is_finite() {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = (ratio * BAR_WIDTH as f64).round() as usize;
    let mut out = String::with_capacity(BAR_WIDTH * 3);
    out.extend(std::iter::repeat_n(FILLED, filled));
    out.extend(std::iter::repeat_n(EMPTY, BAR_WIDTH - filled));
    out
}

/// Terminal columns taken by `text`; wide CJK and emoji characters count double.
fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn pad(text: &str, width: usize) -> String {
    let mut out = text.to_string();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(display_width(text))));
    out
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(display_width).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppRecord, Language, ResultEntry, SiteRecord};
    use crate::services::MetricKey;

    fn entries() -> Vec<ResultEntry> {
        vec![
            ResultEntry::new(
                SiteRecord {
                    domain: "example.com".to_string(),
                    sentiment_score: 85.0,
                    seo_score: 90.0,
                    ..SiteRecord::default()
                }
                .into(),
                Vec::new(),
            ),
            ResultEntry::new(
                AppRecord {
                    app_name: "Notes".to_string(),
                    rating: Some(4.0),
                    downloads: "10M+".to_string(),
                    revenue: Some("$1M/mo".to_string()),
                    countries_available: vec!["US".to_string(), "JP".to_string()],
                    ..AppRecord::default()
                }
                .into(),
                Vec::new(),
            ),
        ]
    }

    fn render(selector: MetricSelector) -> String {
        let view = ComparisonView::build(&entries(), &selector);
        let mut out = Vec::new();
        write_comparison(&mut out, &view, &selector, Messages::for_language(Language::En)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(0.0, 100.0).chars().filter(|c| *c == FILLED).count(), 0);
        assert_eq!(bar(50.0, 100.0).chars().filter(|c| *c == FILLED).count(), 10);
        assert_eq!(bar(250.0, 100.0).chars().filter(|c| *c == FILLED).count(), BAR_WIDTH);
        assert_eq!(bar(5.0, 0.0).chars().count(), BAR_WIDTH);
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("Notes"), 5);
        assert_eq!(display_width("下载量"), 6);
        assert_eq!(pad("下载", 6), "下载  ");
        assert_eq!(display_width("🚀 Go"), 5);
    }

    #[test]
    fn test_render_full_comparison() {
        let out = render(MetricSelector::default());
        assert!(out.contains("Market Strength Comparison"));
        assert!(out.contains("Note: Apps are normalized to 0-100 scale"));
        assert!(out.contains("App Performance & Downloads"));
        assert!(out.contains("10M+"));
        assert!(out.contains(
            "App Name | Downloads | Est. Revenue | Country/Region | User Demographics"
        ));
        assert!(out.contains("$1M/mo"));
        assert!(out.contains("US, JP"));
    }

    #[test]
    fn test_hidden_downloads_skip_chart_and_column() {
        let out = render(MetricSelector::default().without(MetricKey::Downloads));
        assert!(!out.contains("App Performance & Downloads"));
        assert!(!out.contains("| Downloads |"));
        assert!(out.contains("App Name | Est. Revenue"));
    }

    #[test]
    fn test_sites_only_has_no_table() {
        let entries = vec![entries().remove(0)];
        let view = ComparisonView::build(&entries, &MetricSelector::default());
        let mut out = Vec::new();
        write_comparison(
            &mut out,
            &view,
            &MetricSelector::default(),
            Messages::for_language(Language::En),
        )
        .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(!out.contains("Detailed Metrics Comparison"));
        assert!(!out.contains("App Performance"));
    }
}
