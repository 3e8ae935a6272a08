//! Interactive dashboard session.
//!
//! A line-oriented loop over any reader and writer. Each line is one
//! command; a line that is not a command is treated as a target to analyze
//! under the current mode.

use super::{failure_banner, write_error};
use crate::models::{AnalysisMode, Language};
use crate::rendering::{Messages, write_card, write_comparison, write_history, write_result_list};
use crate::services::{Dashboard, MetricKey};
use crate::{Error, Result};
use std::io::{BufRead, Write};

const HELP: &str = "\
Commands:
  site | app [target]  switch analysis mode, then analyze target if given
  lang [en|zh]         switch or toggle language
  analyze <target>     analyze a domain or app link (or just type the target)
  list                 list results
  show <id>            show a result card
  remove <id>          remove a result
  history              show recent searches
  rerun <n>            re-run history entry n
  compare              compare all results
  toggle <metric>      show or hide downloads, revenue, demographics, regions
  help                 show this help
  quit                 leave the session";

/// One parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Blank line.
    Empty,
    /// Switch the analysis mode.
    Mode(AnalysisMode),
    /// Set the language, or toggle it when `None`.
    Language(Option<Language>),
    /// Analyze a target.
    Analyze(String),
    /// Switch the analysis mode, then analyze a target.
    AnalyzeAs(AnalysisMode, String),
    /// List results.
    List,
    /// Show the card of the result with this ID prefix.
    Show(String),
    /// Remove the result with this ID prefix.
    Remove(String),
    /// Show history.
    History,
    /// Re-run a history entry, 1-based.
    Rerun(usize),
    /// Show the comparison.
    Compare,
    /// Toggle a metric.
    Toggle(MetricKey),
    /// Show help.
    Help,
    /// Leave the session.
    Quit,
}

impl SessionCommand {
    /// Parses one input line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when a command is missing its argument
    /// or the argument is malformed.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        let command = match word.to_lowercase().as_str() {
            "" => Self::Empty,
            "site" | "web" => Self::mode_command(AnalysisMode::Site, rest),
            "app" => Self::mode_command(AnalysisMode::App, rest),
            "lang" | "language" => {
                if rest.is_empty() {
                    Self::Language(None)
                } else {
                    Self::Language(Some(rest.parse()?))
                }
            },
            "analyze" | "crawl" => Self::Analyze(required(rest, "analyze <target>")?.to_string()),
            "list" | "ls" => Self::List,
            "show" => Self::Show(required(rest, "show <id>")?.to_string()),
            "remove" | "rm" => Self::Remove(required(rest, "remove <id>")?.to_string()),
            "history" => Self::History,
            "rerun" => {
                let n: usize = required(rest, "rerun <n>")?
                    .parse()
                    .map_err(|_| Error::InvalidInput(format!("not a history number: {rest}")))?;
                if n == 0 {
                    return Err(Error::InvalidInput("history numbers start at 1".to_string()));
                }
                Self::Rerun(n)
            },
            "compare" => Self::Compare,
            "toggle" => Self::Toggle(required(rest, "toggle <metric>")?.parse()?),
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Analyze(line.to_string()),
        };
        Ok(command)
    }

    fn mode_command(mode: AnalysisMode, rest: &str) -> Self {
        if rest.is_empty() {
            Self::Mode(mode)
        } else {
            Self::AnalyzeAs(mode, rest.to_string())
        }
    }
}

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str> {
    if rest.is_empty() {
        Err(Error::InvalidInput(format!("usage: {usage}")))
    } else {
        Ok(rest)
    }
}

/// Runs the session until `quit` or end of input.
///
/// Command failures are written to `writer` and the loop continues.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub fn run_session<R: BufRead, W: Write>(
    dashboard: &Dashboard,
    reader: R,
    writer: &mut W,
) -> Result<()> {
    let messages = dashboard.with_state(|state| state.messages());
    writeln!(writer, "{}", messages.ready).map_err(write_error)?;
    prompt(dashboard, writer)?;

    for line in reader.lines() {
        let line = line.map_err(|e| Error::OperationFailed {
            operation: "read_input".to_string(),
            cause: e.to_string(),
        })?;

        let command = match SessionCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(writer, "! {e}").map_err(write_error)?;
                prompt(dashboard, writer)?;
                continue;
            },
        };

        if command == SessionCommand::Quit {
            break;
        }
        execute(dashboard, command, writer)?;
        prompt(dashboard, writer)?;
    }

    tracing::debug!("Session ended");
    Ok(())
}

fn prompt<W: Write>(dashboard: &Dashboard, writer: &mut W) -> Result<()> {
    let (mode, language) = dashboard.with_state(|state| (state.mode, state.language));
    write!(writer, "cybercrawl [{mode}|{language}]> ").map_err(write_error)?;
    writer.flush().map_err(write_error)
}

fn execute<W: Write>(dashboard: &Dashboard, command: SessionCommand, writer: &mut W) -> Result<()> {
    let messages = dashboard.with_state(|state| state.messages());
    let result = match command {
        SessionCommand::Empty | SessionCommand::Quit => Ok(()),
        SessionCommand::Help => writeln!(writer, "{HELP}"),
        SessionCommand::Mode(mode) => {
            dashboard.set_mode(mode);
            let label = match mode {
                AnalysisMode::Site => messages.site_mode,
                AnalysisMode::App => messages.app_mode,
            };
            writeln!(writer, "{label}")
        },
        SessionCommand::Language(language) => {
            let language = match language {
                Some(language) => {
                    dashboard.set_language(language);
                    language
                },
                None => dashboard.toggle_language(),
            };
            writeln!(writer, "language: {language}")
        },
        SessionCommand::Analyze(target) => return analyze(dashboard, Some(&target), writer),
        SessionCommand::AnalyzeAs(mode, target) => {
            dashboard.set_mode(mode);
            return analyze(dashboard, Some(&target), writer);
        },
        SessionCommand::Rerun(n) => return rerun(dashboard, n - 1, writer),
        SessionCommand::List => write_result_list(writer, &dashboard.entries(), messages),
        SessionCommand::Show(prefix) => {
            let entry = dashboard.with_state(|state| {
                state
                    .store
                    .find_by_prefix(&prefix)
                    .and_then(|id| state.store.get(&id).cloned())
            });
            match entry {
                Some(entry) => write_card(writer, &entry, messages),
                None => writeln!(writer, "! no single result matches '{prefix}'"),
            }
        },
        SessionCommand::Remove(prefix) => match dashboard.remove_by_prefix(&prefix) {
            Some(id) => writeln!(writer, "removed {}", id.short()),
            None => writeln!(writer, "! no single result matches '{prefix}'"),
        },
        SessionCommand::History => write_history(writer, &dashboard.history(), messages),
        SessionCommand::Compare => match dashboard.comparison() {
            Some(view) => write_comparison(writer, &view, &dashboard.selector(), messages),
            None => writeln!(writer, "{}", messages.compare_needs_more),
        },
        SessionCommand::Toggle(key) => {
            let visible = dashboard.toggle_metric(key);
            writeln!(writer, "{key}: {}", if visible { "shown" } else { "hidden" })
        },
    };
    result.map_err(write_error)
}

fn analyze<W: Write>(dashboard: &Dashboard, target: Option<&str>, writer: &mut W) -> Result<()> {
    let messages = dashboard.with_state(|state| state.messages());
    writeln!(writer, "{}", messages.scanning).map_err(write_error)?;
    let outcome = dashboard.submit(target);
    report(dashboard, outcome, messages, writer)
}

fn rerun<W: Write>(dashboard: &Dashboard, index: usize, writer: &mut W) -> Result<()> {
    let messages = dashboard.with_state(|state| state.messages());
    writeln!(writer, "{}", messages.scanning).map_err(write_error)?;
    let outcome = dashboard.rerun(index);
    report(dashboard, outcome, messages, writer)
}

fn report<W: Write>(
    dashboard: &Dashboard,
    outcome: Result<crate::models::ResultId>,
    messages: &Messages,
    writer: &mut W,
) -> Result<()> {
    match outcome {
        Ok(id) => {
            let entry = dashboard.with_state(|state| state.store.get(&id).cloned());
            match entry {
                Some(entry) => write_card(writer, &entry, messages).map_err(write_error),
                None => Ok(()),
            }
        },
        Err(e) => writeln!(writer, "! {}", failure_banner(dashboard, &e)).map_err(write_error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("", SessionCommand::Empty; "blank")]
    #[test_case("site", SessionCommand::Mode(AnalysisMode::Site); "site mode")]
    #[test_case("APP", SessionCommand::Mode(AnalysisMode::App); "app mode")]
    #[test_case("lang", SessionCommand::Language(None); "toggle language")]
    #[test_case("lang zh", SessionCommand::Language(Some(Language::Zh)); "set language")]
    #[test_case("analyze example.com", SessionCommand::Analyze("example.com".into()); "analyze")]
    #[test_case("example.com", SessionCommand::Analyze("example.com".into()); "bare target")]
    #[test_case("app store notes", SessionCommand::AnalyzeAs(AnalysisMode::App, "store notes".into()); "app with target")]
    #[test_case("site  example.com", SessionCommand::AnalyzeAs(AnalysisMode::Site, "example.com".into()); "site with target")]
    #[test_case("rm 1a2b", SessionCommand::Remove("1a2b".into()); "remove")]
    #[test_case("rerun 2", SessionCommand::Rerun(2); "rerun")]
    #[test_case("toggle users", SessionCommand::Toggle(MetricKey::Demographics); "toggle alias")]
    #[test_case("  quit ", SessionCommand::Quit; "quit")]
    fn test_parse(line: &str, expected: SessionCommand) {
        assert_eq!(SessionCommand::parse(line).unwrap(), expected);
    }

    #[test_case("rerun"; "rerun without number")]
    #[test_case("rerun 0"; "rerun zero")]
    #[test_case("rerun two"; "rerun word")]
    #[test_case("toggle speed"; "unknown metric")]
    #[test_case("lang fr"; "unknown language")]
    #[test_case("remove"; "remove without id")]
    fn test_parse_errors(line: &str) {
        assert!(matches!(
            SessionCommand::parse(line),
            Err(Error::InvalidInput(_))
        ));
    }
}
