//! Domain Harvester main entry point
//!
//! This is the command-line interface for the Domain Harvester crawler.

use clap::Parser;
use domain_harvester::config::{load_config_with_hash, validate, Config, TransportFaultPolicy};
use domain_harvester::crawler::crawl_to_file;
use domain_harvester::output::print_statistics;
use domain_harvester::ConfigError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Domain Harvester: collect links, emails and phone numbers from one domain
///
/// Crawls breadth-first from BASE_URL, following secure links on the same
/// domain until the page budget is spent, and writes everything it found to
/// REPORT_FILE.
#[derive(Parser, Debug)]
#[command(name = "domain-harvester")]
#[command(version)]
#[command(about = "Harvest links, emails and phone numbers from a single domain", long_about = None)]
struct Cli {
    /// The initial URL to crawl
    #[arg(value_name = "BASE_URL")]
    base_url: String,

    /// File where all results are written
    #[arg(value_name = "REPORT_FILE")]
    report_file: PathBuf,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to visit (overrides config)
    #[arg(short = 'n', long)]
    max_pages: Option<usize>,

    /// Number of concurrent fetches (overrides config)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Domain whose links are followed (defaults to the seed's host)
    #[arg(short, long)]
    domain: Option<String>,

    /// Keep crawling when a page cannot be reached instead of aborting
    #[arg(long)]
    skip_unreachable: bool,

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

    let config = match load_effective_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Crawling {} (max pages: {}, workers: {})",
        cli.base_url,
        config.crawler.max_pages,
        config.crawler.workers
    );

    let report = match crawl_to_file(&cli.base_url, &config, &cli.report_file).await {
        Ok(report) => {
            tracing::info!("Crawl completed successfully");
            report
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if !cli.quiet {
        print_statistics(&report.stats);
        println!("\n✓ Report written to: {}", cli.report_file.display());
    }

    Ok(())
}

/// Loads the configuration file, if any, and applies command-line overrides
fn load_effective_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(workers) = cli.workers {
        config.crawler.workers = workers;
    }
    if let Some(domain) = &cli.domain {
        config.extract.domain = Some(domain.clone());
    }
    if cli.skip_unreachable {
        config.crawler.on_transport_fault = TransportFaultPolicy::Skip;
    }

    validate(&config)?;

    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("domain_harvester=info,warn"),
            1 => EnvFilter::new("domain_harvester=debug,info"),
            2 => EnvFilter::new("domain_harvester=trace,debug"),
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
