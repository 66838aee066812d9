//! Crawler module for page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - The fetch collaborator trait and its HTTP implementation
//! - Pages, which fetch and mine a single address
//! - The breadth-first coordinator that drives a run

mod coordinator;
mod fetcher;
mod page;

pub use coordinator::{CrawlState, Crawler};
pub use fetcher::{build_http_client, fetch_url, format_user_agent, FetchResult, Fetcher, HttpFetcher};
pub use page::{Page, PageStatus};

pub use crate::config::TransportFaultPolicy;

use crate::config::Config;
use crate::output::{log_statistics, write_report, CrawlReport};
use crate::HarvestError;
use std::path::Path;

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for a crawl. It will:
/// 1. Validate the seed and derive the crawl domain
/// 2. Build the HTTP client
/// 3. Walk the domain breadth-first up to the page budget
/// 4. Return the aggregate report
///
/// # Example
///
/// ```no_run
/// use domain_harvester::config::Config;
/// use domain_harvester::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = crawl("https://example.com", &Config::default()).await?;
/// println!("{} emails found", report.emails.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(seed: &str, config: &Config) -> Result<CrawlReport, HarvestError> {
    let mut crawler = Crawler::from_config(seed, config)?;
    let fetcher = HttpFetcher::new(&config.user_agent, &config.http)?;
    crawler.run(&fetcher).await
}

/// Runs a complete crawl and writes the report to `report_path`
///
/// Failing to write the report is an error even though the crawl itself
/// succeeded; the returned report is the one that was written.
pub async fn crawl_to_file(
    seed: &str,
    config: &Config,
    report_path: &Path,
) -> Result<CrawlReport, HarvestError> {
    let report = crawl(seed, config).await?;
    log_statistics(&report.stats);

    write_report(&report, report_path)?;
    tracing::info!("Report written to {}", report_path.display());

    Ok(report)
}
