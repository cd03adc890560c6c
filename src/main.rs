//! SEO Checker main entry point
//!
//! This is the command-line interface for the SEO Checker.

use clap::Parser;
use seo_checker::config::{load_config, validate, Config};
use seo_checker::output::{export_to_csv, export_to_json, print_report, print_summary, RunSummary};
use seo_checker::url::load_url_list;
use seo_checker::SeoChecker;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// SEO Checker: fetch pages and audit their title, description and headings
///
/// Each URL is fetched with a browser-mimicking HTTP client, falling back to
/// headless Chrome, then scored against title, meta description and H1 rules.
#[derive(Parser, Debug)]
#[command(name = "seo-checker")]
#[command(version = "1.0.0")]
#[command(about = "Audit page titles, meta descriptions and H1 headings", long_about = None)]
struct Cli {
    /// URLs to check
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// File with one URL per line (blank lines and # comments skipped)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write results as CSV
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Write results as JSON
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Passes over the fetch strategies before giving up on a URL
    #[arg(long)]
    max_retries: Option<u32>,

    /// Anti-captcha service key
    #[arg(long, env = "ANTICAPTCHA_KEY", hide_env_values = true)]
    anticaptcha_key: Option<String>,

    /// Skip the headless browser fallback
    #[arg(long)]
    no_browser: bool,

    /// Seed for user-agent and backoff selection
    #[arg(long)]
    seed: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    let mut urls = cli.urls.clone();
    if let Some(input) = &cli.input {
        let listed = load_url_list(input)?;
        tracing::info!("Loaded {} URLs from {}", listed.len(), input.display());
        urls.extend(listed);
    }

    if urls.is_empty() {
        return Err("no URLs given; pass them as arguments or with --input".into());
    }

    let checker = SeoChecker::from_config(&config)?;
    let records = run_checks(&checker, &urls, cli.quiet).await;

    if let Some(path) = &config.output.csv_path {
        export_to_csv(&records, path)?;
    }
    if let Some(path) = &config.output.json_path {
        export_to_json(&records, path)?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seo_checker=info,warn"),
            1 => EnvFilter::new("seo_checker=debug,info"),
            2 => EnvFilter::new("seo_checker=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn build_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    if let Some(max_retries) = cli.max_retries {
        config.fetch.max_retries = max_retries;
    }
    if let Some(seed) = cli.seed {
        config.fetch.seed = Some(seed);
    }
    if cli.anticaptcha_key.is_some() {
        config.captcha.api_key = cli.anticaptcha_key.clone();
    }
    if cli.no_browser {
        config.browser.enabled = false;
    }
    if cli.csv.is_some() {
        config.output.csv_path = cli.csv.clone();
    }
    if cli.json.is_some() {
        config.output.json_path = cli.json.clone();
    }

    validate(&config)?;
    Ok(config)
}

/// Checks every URL in order; failures are logged and skipped
async fn run_checks(
    checker: &SeoChecker,
    urls: &[String],
    quiet: bool,
) -> Vec<seo_checker::SeoMetadata> {
    let mut records = Vec::with_capacity(urls.len());
    let mut summary = RunSummary::new();

    for url in urls {
        match checker.extract_metadata(url).await {
            Ok(metadata) => {
                let report = checker.analyze_metadata(&metadata);
                summary.record_success(&report);
                if !quiet {
                    print_report(&metadata, &report);
                }
                records.push(metadata);
            }
            Err(e) => {
                tracing::error!("Skipping {}: {}", url, e);
                summary.record_failure();
            }
        }
    }

    if !quiet {
        print_summary(&summary);
    }

    records
}
