//! Statistics collected during a crawl run

/// Per-run counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages counted against the budget
    pub pages_visited: usize,

    /// Pages whose body was fetched and mined
    pub pages_fetched: usize,

    /// Pages that answered with a non-success status
    pub http_errors: usize,

    /// Pages skipped because the transport failed
    pub transport_faults: usize,

    /// Frontier entries dropped because they were already visited
    pub duplicates_skipped: usize,
}

impl CrawlStats {
    /// Percentage of visited pages that yielded a body
    pub fn success_rate(&self) -> f64 {
        if self.pages_visited == 0 {
            return 0.0;
        }
        (self.pages_fetched as f64 / self.pages_visited as f64) * 100.0
    }
}

/// Emits the statistics through `tracing`
pub fn log_statistics(stats: &CrawlStats) {
    tracing::info!(
        "Visited {} pages ({} fetched, {} HTTP errors, {} transport faults), skipped {} duplicates",
        stats.pages_visited,
        stats.pages_fetched,
        stats.http_errors,
        stats.transport_faults,
        stats.duplicates_skipped
    );
}

/// Prints the statistics to stdout
pub fn print_statistics(stats: &CrawlStats) {
    println!("=== Crawl Statistics ===\n");
    println!("Pages visited:      {}", stats.pages_visited);
    println!("Pages fetched:      {}", stats.pages_fetched);
    println!("HTTP errors:        {}", stats.http_errors);
    println!("Transport faults:   {}", stats.transport_faults);
    println!("Duplicates skipped: {}", stats.duplicates_skipped);
    println!("Success rate:       {:.2}%", stats.success_rate());
}
