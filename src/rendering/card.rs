//! Result cards and list views.

use super::Messages;
use crate::models::{AnalysisRecord, AppRecord, HistoryEntry, ResultEntry, SiteRecord, TrustProfile};
use crate::services::NOT_AVAILABLE;
use std::io::{self, Write};

/// Technologies shown on a site card.
pub const TECH_STACK_PREVIEW_LEN: usize = 6;

/// Board members shown in the trust block.
pub const BOARD_PREVIEW_LEN: usize = 4;

/// Sources listed under a card.
pub const SOURCES_PREVIEW_LEN: usize = 3;

/// Writes one result card.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_card<W: Write>(
    writer: &mut W,
    entry: &ResultEntry,
    messages: &Messages,
) -> io::Result<()> {
    let (badge, mode_label) = match &entry.record {
        AnalysisRecord::Site(_) => ("SITE", messages.site_mode),
        AnalysisRecord::App(_) => ("APP", messages.app_mode),
    };
    writeln!(
        writer,
        "[{badge}] {}  ({mode_label}, id {})",
        entry.record.display_name(),
        entry.id.short()
    )?;

    match &entry.record {
        AnalysisRecord::Site(site) => write_site_body(writer, site, messages)?,
        AnalysisRecord::App(app) => write_app_body(writer, app, messages)?,
    }

    write_trust_block(writer, entry.record.trust(), messages)?;

    if !entry.sources.is_empty() {
        writeln!(writer, "  {}:", messages.sources)?;
        for (i, source) in entry.sources.iter().take(SOURCES_PREVIEW_LEN).enumerate() {
            let title = if source.title.is_empty() {
                &source.url
            } else {
                &source.title
            };
            writeln!(writer, "    {}. {title} <{}>", i + 1, source.url)?;
        }
    }

    Ok(())
}

fn write_site_body<W: Write>(
    writer: &mut W,
    site: &SiteRecord,
    messages: &Messages,
) -> io::Result<()> {
    if !site.site_name.is_empty() {
        writeln!(writer, "  {}", site.site_name)?;
    }
    if !site.description.is_empty() {
        writeln!(writer, "  {}", site.description)?;
    }
    write_list(writer, messages.topics, &site.main_topics)?;
    write_field(writer, messages.audience, &site.target_audience)?;
    writeln!(
        writer,
        "  {}: {:.0}/100  {}: {:.0}/100",
        messages.sentiment, site.sentiment_score, messages.seo, site.seo_score
    )?;
    write_field(writer, messages.traffic, &site.key_stats.estimated_traffic_tier)?;
    write_field(writer, messages.frequency, &site.key_stats.content_frequency)?;
    let tech: Vec<String> = site
        .tech_stack
        .iter()
        .take(TECH_STACK_PREVIEW_LEN)
        .cloned()
        .collect();
    write_list(writer, messages.tech_stack, &tech)?;
    write_list(writer, messages.tags, &site.tags)?;
    write_list(writer, messages.social, &site.social_links)?;
    write_list(writer, messages.contact, &site.contact_info)
}

fn write_app_body<W: Write>(
    writer: &mut W,
    app: &AppRecord,
    messages: &Messages,
) -> io::Result<()> {
    if !app.description.is_empty() {
        writeln!(writer, "  {}", app.description)?;
    }
    writeln!(writer, "  {}: {}", messages.platform, app.platform.as_str())?;
    write_field(writer, messages.developer, &app.developer)?;
    write_field(writer, messages.category, &app.category)?;
    match app.rating {
        Some(rating) => writeln!(writer, "  {}: {rating:.1}/5", messages.rating)?,
        None => writeln!(writer, "  {}: {NOT_AVAILABLE}", messages.rating)?,
    }
    writeln!(
        writer,
        "  {}: {}",
        messages.col_downloads,
        or_not_available(Some(app.downloads.as_str()))
    )?;
    writeln!(writer, "  {}: {}", messages.col_revenue, or_not_available(app.revenue.as_deref()))?;
    writeln!(
        writer,
        "  {}: {}",
        messages.col_demographics,
        or_not_available(app.user_demographics.as_deref())
    )?;
    write_field(writer, messages.price, &app.price)?;
    write_list(writer, messages.col_regions, &app.countries_available)?;
    write_list(writer, messages.tags, &app.tags)?;
    write_field(writer, messages.last_updated, &app.last_updated)
}

fn write_trust_block<W: Write>(
    writer: &mut W,
    trust: &TrustProfile,
    messages: &Messages,
) -> io::Result<()> {
    let (mark, label) = verdict(trust.serves_china, messages.serves_china, messages.no_china);
    writeln!(writer, "  [{mark}] {label}{}", detail(&trust.china_service_details))?;

    let (mark, label) = verdict(
        trust.china_auth_available,
        messages.china_auth,
        messages.no_china_auth,
    );
    writeln!(writer, "  [{mark}] {label}{}", detail(&trust.china_auth_details))?;

    if !trust.board_members.is_empty() {
        let board: Vec<String> = trust
            .board_members
            .iter()
            .take(BOARD_PREVIEW_LEN)
            .cloned()
            .collect();
        write_list(writer, messages.board, &board)?;
    }

    let (mark, label) = verdict(
        trust.stablecoin_payment,
        messages.stablecoin,
        messages.no_stablecoin,
    );
    let details = if trust.stablecoin_details.is_empty() {
        messages.no_crypto_found
    } else {
        trust.stablecoin_details.as_str()
    };
    writeln!(writer, "  [{mark}] {label}: {details}")
}

const fn verdict(flag: bool, yes: &'static str, no: &'static str) -> (char, &'static str) {
    if flag { ('+', yes) } else { ('-', no) }
}

fn detail(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!(": {text}")
    }
}

fn write_field<W: Write>(writer: &mut W, label: &str, value: &str) -> io::Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    writeln!(writer, "  {label}: {value}")
}

fn write_list<W: Write>(writer: &mut W, label: &str, values: &[String]) -> io::Result<()> {
    if values.is_empty() {
        return Ok(());
    }
    writeln!(writer, "  {label}: {}", values.join(", "))
}

fn or_not_available(value: Option<&str>) -> &str {
    value.filter(|s| !s.is_empty()).unwrap_or(NOT_AVAILABLE)
}

/// Writes the result list, one line per entry, newest first.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_result_list<W: Write>(
    writer: &mut W,
    entries: &[ResultEntry],
    messages: &Messages,
) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(writer, "{}", messages.ready);
    }
    writeln!(writer, "{} ({})", messages.results, entries.len())?;
    for entry in entries {
        writeln!(
            writer,
            "  {}  {:<4}  {}",
            entry.id.short(),
            entry.kind().as_str(),
            entry.record.display_name()
        )?;
    }
    Ok(())
}

/// Writes the query history, numbered from 1.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_history<W: Write>(
    writer: &mut W,
    history: &[HistoryEntry],
    messages: &Messages,
) -> io::Result<()> {
    if history.is_empty() {
        return writeln!(writer, "{}", messages.no_history);
    }
    writeln!(writer, "{}", messages.recent_searches)?;
    for (i, entry) in history.iter().enumerate() {
        writeln!(
            writer,
            "  {:>2}. {:<4}  {}  ({})",
            i + 1,
            entry.mode.as_str(),
            entry.query,
            entry.timestamp.format("%H:%M:%S")
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, Source};

    fn render(entry: &ResultEntry, language: Language) -> String {
        let mut out = Vec::new();
        write_card(&mut out, entry, Messages::for_language(language)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_site_card() {
        let site = SiteRecord {
            domain: "example.com".to_string(),
            site_name: "Example".to_string(),
            sentiment_score: 85.0,
            seo_score: 90.0,
            tech_stack: (1..=8).map(|i| format!("tech{i}")).collect(),
            trust: TrustProfile {
                serves_china: true,
                china_service_details: "ICP licensed".to_string(),
                board_members: (1..=6).map(|i| format!("member{i}")).collect(),
                ..TrustProfile::default()
            },
            ..SiteRecord::default()
        };
        let sources = (1..=5)
            .map(|i| Source {
                title: format!("page{i}"),
                url: format!("https://example.com/{i}"),
            })
            .collect();
        let out = render(&ResultEntry::new(site.into(), sources), Language::En);

        assert!(out.starts_with("[SITE] example.com"));
        assert!(out.contains("Sentiment: 85/100  SEO: 90/100"));
        assert!(out.contains("tech6"));
        assert!(!out.contains("tech7"));
        assert!(out.contains("[+] Serves Mainland China: ICP licensed"));
        assert!(out.contains("[-] CN registration/login not supported\n"));
        assert!(out.contains("member4"));
        assert!(!out.contains("member5"));
        assert!(out.contains(
            "[-] No Stablecoin Payment: No direct crypto payment methods identified."
        ));
        assert!(out.contains("3. page3"));
        assert!(!out.contains("page4"));
    }

    #[test]
    fn test_app_card_placeholders() {
        let app = AppRecord {
            app_name: "Notes".to_string(),
            rating: None,
            downloads: "1M+".to_string(),
            revenue: Some(String::new()),
            ..AppRecord::default()
        };
        let out = render(&ResultEntry::new(app.into(), Vec::new()), Language::En);

        assert!(out.starts_with("[APP] Notes"));
        assert!(out.contains("Platform: Unknown"));
        assert!(out.contains("Rating: N/A"));
        assert!(out.contains("Downloads: 1M+"));
        assert!(out.contains("Est. Revenue: N/A"));
        assert!(out.contains("User Demographics: N/A"));
        assert!(!out.contains("Sources"));
    }

    #[test]
    fn test_card_is_localized() {
        let app = AppRecord {
            app_name: "Notes".to_string(),
            rating: Some(4.5),
            ..AppRecord::default()
        };
        let out = render(&ResultEntry::new(app.into(), Vec::new()), Language::Zh);
        assert!(out.contains("评分: 4.5/5"));
        assert!(out.contains("未检测到中国大陆服务"));
    }

    #[test]
    fn test_empty_lists() {
        let messages = Messages::for_language(Language::En);
        let mut out = Vec::new();
        write_result_list(&mut out, &[], messages).unwrap();
        write_history(&mut out, &[], messages).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains(messages.ready));
        assert!(out.contains(messages.no_history));
    }
}
