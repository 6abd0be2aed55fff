//! Link-Harvest main entry point
//!
//! This is the command-line interface for the Link-Harvest link extractor.

use anyhow::Context;
use clap::{ArgGroup, Parser};
use link_harvest::config::{resolve_config, Config, ConfigOverrides};
use link_harvest::crawler::harvest;
use link_harvest::input::load_urls;
use link_harvest::output::{print_run_summary, write_outputs};
use link_harvest::results::{FetchOutcome, ProgressObserver, ResultTable, RunSummary};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Link-Harvest: extract all links from multiple web pages
///
/// Fetches every URL concurrently, collects the target of each anchor on
/// the page and saves the results as text, CSV or JSON, with an optional
/// report.
#[derive(Parser, Debug)]
#[command(name = "link-harvest")]
#[command(version)]
#[command(about = "Extract all links from multiple web pages", long_about = None)]
#[command(after_help = "Example:\n  link-harvest -f urls.txt -r 10 -o links.txt -c links.csv -j links.json -t")]
#[command(group(ArgGroup::new("source").required(true).multiple(true).args(["file", "url"])))]
struct Cli {
    /// File with URLs to scan (one per line)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Single URL to scan
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,

    /// Number of concurrent workers [default: 5]
    #[arg(short = 'r', long, value_name = "N")]
    threads: Option<usize>,

    /// Save links in TXT format
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Save links in CSV format
    #[arg(short, long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Save links in JSON format
    #[arg(short, long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Generate a report after scanning
    #[arg(short = 't', long)]
    report: bool,

    /// Path to TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Proxy for both http and https requests
    #[arg(long, value_name = "URL")]
    proxy: Option<String>,

    /// Per-request timeout in seconds [default: 10]
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            concurrency: self.threads,
            timeout_secs: self.timeout,
            proxy: self.proxy.clone(),
            text_path: self.output.clone(),
            csv_path: self.csv.clone(),
            json_path: self.json.clone(),
            report: self.report,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = resolve_config(cli.config.as_deref(), &cli.overrides())
        .context("Failed to load configuration")?;
    if let Some(hash) = &config_hash {
        tracing::info!("Configuration loaded successfully (hash: {})", hash);
    }

    let urls = load_urls(cli.file.as_deref(), cli.url.as_deref())?;
    tracing::info!(
        "Scanning {} URLs with {} workers",
        urls.len(),
        config.scraper.concurrency
    );

    let observer = (!cli.quiet).then(console_observer);
    let (table, summary) = harvest(&config, &urls, observer)
        .await
        .context("Harvest failed")?;

    write_results(&config, &table, &summary, config_hash)?;

    if !cli.quiet {
        print_run_summary(&summary);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_harvest=info,warn"),
            1 => EnvFilter::new("link_harvest=debug,info"),
            2 => EnvFilter::new("link_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints each page's links as soon as its task finishes
///
/// Failures are already logged by the dispatcher.
fn console_observer() -> ProgressObserver {
    Arc::new(|url: &str, outcome: &FetchOutcome| {
        if let FetchOutcome::Success(links) = outcome {
            let mut block = format!("Links found on {}:\n", url);
            for link in links {
                block.push_str(link);
                block.push('\n');
            }
            println!("{}", block);
        }
    })
}

/// Writes the requested files and confirms each one
fn write_results(
    config: &Config,
    table: &ResultTable,
    summary: &RunSummary,
    config_hash: Option<String>,
) -> anyhow::Result<()> {
    let written = write_outputs(&config.output, table, summary, config_hash)
        .context("Failed to write output")?;

    for (format, path) in written {
        println!("Links successfully saved to {} {}", format, path.display());
    }

    Ok(())
}
