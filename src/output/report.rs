//! Plain-text crawl report
//!
//! The report lists the seed followed by three sections in a fixed order:
//! URLs, emails and phone numbers, one entry per line.

use crate::output::stats::CrawlStats;
use crate::output::{OutputError, OutputResult};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Everything a finished crawl discovered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// The seed address the crawl started from
    pub base_url: String,

    /// Union of in-domain links found on every visited page
    pub urls: BTreeSet<String>,

    /// Union of email addresses found on every visited page
    pub emails: BTreeSet<String>,

    /// Union of normalized phone numbers found on every visited page
    pub phones: BTreeSet<String>,

    /// Visited addresses in visit order
    pub pages_visited: Vec<String>,

    /// Counters collected during the run
    pub stats: CrawlStats,
}

impl CrawlReport {
    /// Returns true if no links, emails or phones were found
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty() && self.emails.is_empty() && self.phones.is_empty()
    }
}

/// Writes the report to `output_path`, replacing any existing file
pub fn write_report(report: &CrawlReport, output_path: &Path) -> OutputResult<()> {
    fs::write(output_path, format_report(report)).map_err(|source| OutputError::Write {
        path: output_path.display().to_string(),
        source,
    })
}

/// Formats a report as plain text
///
/// ```
/// use domain_harvester::output::{format_report, CrawlReport};
///
/// let report = CrawlReport {
///     base_url: "https://example.com".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(
///     format_report(&report),
///     "Base URL: https://example.com\n\nURLs:\n\nEmails:\n\nPhones:\n"
/// );
/// ```
pub fn format_report(report: &CrawlReport) -> String {
    let mut text = String::new();

    text.push_str(&format!("Base URL: {}\n\n", report.base_url));

    push_section(&mut text, "URLs", &report.urls);
    text.push('\n');
    push_section(&mut text, "Emails", &report.emails);
    text.push('\n');
    push_section(&mut text, "Phones", &report.phones);

    text
}

fn push_section(text: &mut String, title: &str, entries: &BTreeSet<String>) {
    text.push_str(title);
    text.push_str(":\n");
    for entry in entries {
        text.push_str(entry);
        text.push('\n');
    }
}
