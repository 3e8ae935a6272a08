//! `analyze` command.

use super::{OutputFormat, json_error, write_error};
use crate::models::AnalysisMode;
use crate::rendering::write_card;
use crate::services::Dashboard;
use crate::{Error, Result};
use std::io::Write;

/// Analyzes `target` under `mode` and writes its card or JSON.
///
/// # Errors
///
/// Returns an error if the target is blank, the gateway fails, or writing
/// the output fails.
pub fn cmd_analyze<W: Write>(
    writer: &mut W,
    dashboard: &Dashboard,
    target: &str,
    mode: AnalysisMode,
    format: OutputFormat,
) -> Result<()> {
    dashboard.set_mode(mode);
    let id = dashboard.submit(Some(target))?;

    let entry = dashboard
        .with_state(|state| state.store.get(&id).cloned())
        .ok_or_else(|| Error::OperationFailed {
            operation: "analyze".to_string(),
            cause: format!("result {id} vanished"),
        })?;

    match format {
        OutputFormat::Text => {
            let messages = dashboard.with_state(|state| state.messages());
            write_card(writer, &entry, messages).map_err(write_error)
        },
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&entry).map_err(json_error)?;
            writeln!(writer, "{json}").map_err(write_error)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{AnalysisGateway, GatewayResponse};
    use crate::models::{Language, SiteRecord};
    use std::sync::Arc;

    struct FixedGateway;

    impl AnalysisGateway for FixedGateway {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn analyze(
            &self,
            target: &str,
            _mode: AnalysisMode,
            _language: Language,
        ) -> Result<GatewayResponse> {
            Ok(GatewayResponse {
                record: SiteRecord {
                    domain: target.to_string(),
                    seo_score: 70.0,
                    ..SiteRecord::default()
                }
                .into(),
                sources: Vec::new(),
            })
        }
    }

    #[test]
    fn test_analyze_text() {
        let dashboard = Dashboard::new(Arc::new(FixedGateway));
        let mut out = Vec::new();
        cmd_analyze(
            &mut out,
            &dashboard,
            "example.com",
            AnalysisMode::Site,
            OutputFormat::Text,
        )
        .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("[SITE] example.com"));
        assert!(out.contains("SEO: 70/100"));
    }

    #[test]
    fn test_analyze_json() {
        let dashboard = Dashboard::new(Arc::new(FixedGateway));
        let mut out = Vec::new();
        cmd_analyze(
            &mut out,
            &dashboard,
            "example.com",
            AnalysisMode::Site,
            OutputFormat::Json,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["record"]["kind"], "site");
        assert_eq!(value["record"]["domain"], "example.com");
    }

    #[test]
    fn test_analyze_blank_target() {
        let dashboard = Dashboard::new(Arc::new(FixedGateway));
        let mut out = Vec::new();
        let err = cmd_analyze(&mut out, &dashboard, "  ", AnalysisMode::Site, OutputFormat::Text)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(out.is_empty());
    }
}
