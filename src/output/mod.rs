//! Output module for crawl reports
//!
//! This module handles:
//! - Rendering the aggregate crawl report as plain text
//! - Writing the report to a file
//! - Summarizing crawl statistics

mod report;
mod stats;

pub use report::{format_report, write_report, CrawlReport};
pub use stats::{log_statistics, print_statistics, CrawlStats};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
