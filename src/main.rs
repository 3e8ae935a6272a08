//! Binary entry point for cybercrawl.
//!
//! This binary provides the CLI interface for the cybercrawl dashboard.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use cybercrawl::cli::{self, CompareTargets, OutputFormat};
use cybercrawl::config::CrawlConfig;
use cybercrawl::{AnalysisMode, Dashboard, GeminiClient, Language, MetricKey, observability};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

/// CyberCrawl - website and app-store intelligence from the terminal.
#[derive(Parser)]
#[command(name = "cybercrawl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "CYBERCRAWL_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Display and answer language: en or zh.
    #[arg(long, global = true)]
    lang: Option<Language>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Analyze a website or an app listing.
    Analyze {
        /// Domain, app store URL, or app name.
        target: String,

        /// Analysis mode: site or app.
        #[arg(short, long, default_value = "site")]
        mode: AnalysisMode,

        /// Output format: text or json.
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Analyze several targets and compare them.
    Compare {
        /// Website to analyze (repeatable).
        #[arg(long = "site")]
        sites: Vec<String>,

        /// App store URL or app name to analyze (repeatable).
        #[arg(long = "app")]
        apps: Vec<String>,

        /// Metric to hide: downloads, revenue, demographics, regions (repeatable).
        #[arg(long)]
        hide: Vec<MetricKey>,

        /// Output format: text or json.
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Start an interactive dashboard session.
    Session,
}

/// Main entry point.
fn main() -> ExitCode {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_settings(&config.logging, cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, mut config: CrawlConfig) -> anyhow::Result<()> {
    if let Some(language) = cli.lang {
        config.dashboard.language = language;
    }

    let gateway = Arc::new(GeminiClient::from_config(&config.gateway));
    let dashboard = Dashboard::with_settings(gateway, &config.dashboard);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Analyze {
            target,
            mode,
            format,
        } => cli::cmd_analyze(&mut out, &dashboard, &target, mode, format)
            .with_context(|| format!("analysis of '{target}' failed")),

        Commands::Compare {
            sites,
            apps,
            hide,
            format,
        } => {
            let targets = CompareTargets { sites, apps, hide };
            cli::cmd_compare(&mut out, &dashboard, &targets, format).context("comparison failed")
        },

        Commands::Session => {
            let stdin = io::stdin();
            cli::run_session(&dashboard, stdin.lock(), &mut out).context("session failed")
        },
    }
}

/// Loads configuration from `path` or the default location, then applies
/// environment overrides.
fn load_config(path: Option<&Path>) -> anyhow::Result<CrawlConfig> {
    let config = match path {
        Some(path) => CrawlConfig::load_from_file(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => CrawlConfig::load_default(),
    };
    Ok(config.with_env_overrides())
}
