//! `compare` command.

use super::{OutputFormat, failure_banner, json_error, write_error};
use crate::models::AnalysisMode;
use crate::rendering::{write_comparison, write_result_list};
use crate::services::{Dashboard, MetricKey};
use crate::{Error, Result};
use serde::Serialize;
use std::io::Write;

/// Targets and display options for `compare`.
#[derive(Debug, Clone, Default)]
pub struct CompareTargets {
    /// Websites to analyze.
    pub sites: Vec<String>,
    /// App store links or app names to analyze.
    pub apps: Vec<String>,
    /// Metrics to hide from the detail table and charts.
    pub hide: Vec<MetricKey>,
}

impl CompareTargets {
    fn queue(&self) -> impl Iterator<Item = (AnalysisMode, &str)> {
        self.sites
            .iter()
            .map(|t| (AnalysisMode::Site, t.as_str()))
            .chain(self.apps.iter().map(|t| (AnalysisMode::App, t.as_str())))
    }
}

#[derive(Serialize)]
struct CompareReport<'a> {
    entries: &'a [crate::models::ResultEntry],
    failures: &'a [Failure],
    comparison: &'a crate::services::ComparisonView,
}

#[derive(Serialize)]
struct Failure {
    mode: AnalysisMode,
    target: String,
    message: String,
}

/// Analyzes every target, then writes the comparison.
///
/// Targets are analyzed in order, sites first. A target that fails is
/// reported and skipped; the comparison covers the rest.
///
/// # Errors
///
/// Returns an error if fewer than two targets succeed or writing fails.
pub fn cmd_compare<W: Write>(
    writer: &mut W,
    dashboard: &Dashboard,
    targets: &CompareTargets,
    format: OutputFormat,
) -> Result<()> {
    let mut failures = Vec::new();
    for (mode, target) in targets.queue() {
        dashboard.set_mode(mode);
        if let Err(e) = dashboard.submit(Some(target)) {
            let message = failure_banner(dashboard, &e);
            tracing::warn!(mode = %mode, query = %target, error = %e, "Skipping target");
            failures.push(Failure {
                mode,
                target: target.to_string(),
                message,
            });
        }
    }

    for key in &targets.hide {
        dashboard.set_metric(*key, false);
    }

    let messages = dashboard.with_state(|state| state.messages());
    let Some(view) = dashboard.comparison() else {
        for failure in &failures {
            writeln!(writer, "! {} {}: {}", failure.mode, failure.target, failure.message)
                .map_err(write_error)?;
        }
        return Err(Error::InvalidInput(messages.compare_needs_more.to_string()));
    };
    let entries = dashboard.entries();

    match format {
        OutputFormat::Text => {
            for failure in &failures {
                writeln!(writer, "! {} {}: {}", failure.mode, failure.target, failure.message)
                    .map_err(write_error)?;
            }
            write_result_list(writer, &entries, messages).map_err(write_error)?;
            writeln!(writer).map_err(write_error)?;
            write_comparison(writer, &view, &dashboard.selector(), messages).map_err(write_error)
        },
        OutputFormat::Json => {
            let report = CompareReport {
                entries: &entries,
                failures: &failures,
                comparison: &view,
            };
            let json = serde_json::to_string_pretty(&report).map_err(json_error)?;
            writeln!(writer, "{json}").map_err(write_error)
        },
    }
}
