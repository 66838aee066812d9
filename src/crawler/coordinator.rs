//! Crawler coordinator - bounded breadth-first traversal
//!
//! The [`Crawler`] owns all state for one run:
//! - the frontier of addresses waiting to be visited (FIFO)
//! - the visited set, which only grows
//! - the union of every visited page's links, emails and phones
//!
//! A run moves `Idle → Running → Done`. It is done once the page budget is
//! spent or the frontier runs dry, whichever comes first.

use crate::config::{Config, TransportFaultPolicy};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::page::{Page, PageStatus};
use crate::extract::Extractor;
use crate::output::{CrawlReport, CrawlStats};
use crate::url::{parse_seed, seed_domain};
use crate::HarvestError;
use futures::stream::{self, StreamExt};
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::time::Instant;

/// Lifecycle of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// Created but not started
    Idle,
    /// Frontier is being consumed
    Running,
    /// Budget spent or frontier empty; the report is available
    Done,
}

/// State and driver for one crawl run
#[derive(Debug)]
pub struct Crawler {
    seed: String,
    budget: usize,
    extractor: Extractor,
    policy: TransportFaultPolicy,
    workers: usize,

    state: CrawlState,
    frontier: VecDeque<String>,
    visited: HashSet<String>,
    visit_order: Vec<String>,

    links: BTreeSet<String>,
    emails: BTreeSet<String>,
    phones: BTreeSet<String>,

    stats: CrawlStats,
}

impl Crawler {
    /// Creates an idle crawler
    ///
    /// # Arguments
    ///
    /// * `seed` - The address the traversal starts from
    /// * `budget` - Maximum number of pages to visit
    /// * `extractor` - Extraction rules, including the domain to stay on
    pub fn new(seed: impl Into<String>, budget: usize, extractor: Extractor) -> Self {
        Self {
            seed: seed.into(),
            budget,
            extractor,
            policy: TransportFaultPolicy::default(),
            workers: 1,
            state: CrawlState::Idle,
            frontier: VecDeque::new(),
            visited: HashSet::new(),
            visit_order: Vec::new(),
            links: BTreeSet::new(),
            emails: BTreeSet::new(),
            phones: BTreeSet::new(),
            stats: CrawlStats::default(),
        }
    }

    /// Creates an idle crawler from a seed and a loaded configuration
    ///
    /// The crawl domain is `extract.domain` when set, otherwise the seed's
    /// host without a leading `www.`.
    pub fn from_config(seed: &str, config: &Config) -> Result<Self, HarvestError> {
        let url = parse_seed(seed)?;

        let domain = match &config.extract.domain {
            Some(domain) => domain.clone(),
            None => seed_domain(&url)?,
        };

        let extractor =
            Extractor::new(domain).with_excluded_extensions(&config.extract.excluded_extensions);

        Ok(Self::new(seed.trim(), config.crawler.max_pages, extractor)
            .with_policy(config.crawler.on_transport_fault)
            .with_workers(config.crawler.workers))
    }

    /// Sets what happens when a page cannot be reached at all
    pub fn with_policy(mut self, policy: TransportFaultPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets how many fetches may be in flight at once (at least one)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// Visited addresses in the order they were visited
    pub fn visit_order(&self) -> &[String] {
        &self.visit_order
    }

    pub fn links(&self) -> &BTreeSet<String> {
        &self.links
    }

    pub fn emails(&self) -> &BTreeSet<String> {
        &self.emails
    }

    pub fn phones(&self) -> &BTreeSet<String> {
        &self.phones
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// Resets all run state and seeds the frontier
    ///
    /// A zero budget goes straight to `Done`.
    pub fn start(&mut self) {
        self.frontier.clear();
        self.frontier.push_back(self.seed.clone());
        self.visited.clear();
        self.visit_order.clear();
        self.links.clear();
        self.emails.clear();
        self.phones.clear();
        self.stats = CrawlStats::default();

        self.state = CrawlState::Running;
        tracing::info!(
            "Starting crawl at {} (budget {}, domain {})",
            self.seed,
            self.budget,
            self.extractor.domain()
        );

        self.update_state();
    }

    /// Performs one traversal step
    ///
    /// Looks at the front of the frontier. An already visited address is
    /// dropped without touching the budget; any other address is fetched,
    /// mined, and counted.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlState)` - State after the step
    /// * `Err(HarvestError::InvalidState)` - The crawler was never started
    /// * `Err(HarvestError::Transport)` - Unreachable page under the abort policy
    pub async fn step<F>(&mut self, fetcher: &F) -> Result<CrawlState, HarvestError>
    where
        F: Fetcher + ?Sized,
    {
        match self.state {
            CrawlState::Idle => {
                return Err(HarvestError::InvalidState {
                    expected: CrawlState::Running,
                    found: CrawlState::Idle,
                })
            }
            CrawlState::Done => return Ok(CrawlState::Done),
            CrawlState::Running => {}
        }

        if let Some(address) = self.frontier.front().cloned() {
            if self.visited.contains(&address) {
                tracing::trace!("Skipping already visited {}", address);
                self.frontier.pop_front();
                self.stats.duplicates_skipped += 1;
            } else {
                tracing::debug!("Processing URL: {}", address);
                let page = Page::fetch(address, fetcher, &self.extractor).await;
                self.absorb(page)?;
                self.frontier.pop_front();
            }
        }

        self.update_state();
        Ok(self.state)
    }

    /// Runs the crawl to completion and returns the report
    ///
    /// Starts the crawler first if it is still idle. With more than one worker
    /// the next few unvisited addresses are fetched together, but results are
    /// merged in frontier order so the visit order matches a one-worker run.
    pub async fn run<F>(&mut self, fetcher: &F) -> Result<CrawlReport, HarvestError>
    where
        F: Fetcher + ?Sized,
    {
        if self.state == CrawlState::Idle {
            self.start();
        }

        let start_time = Instant::now();
        let mut last_progress = 0;

        while self.state == CrawlState::Running {
            if self.workers > 1 {
                self.step_batch(fetcher).await?;
            } else {
                self.step(fetcher).await?;
            }

            let visited = self.visited.len();
            if visited % 10 == 0 && visited != last_progress {
                last_progress = visited;
                tracing::info!(
                    "Progress: {} pages visited, {} in frontier, {:.2} pages/sec",
                    visited,
                    self.frontier.len(),
                    visited as f64 / start_time.elapsed().as_secs_f64()
                );
            }
        }

        tracing::info!(
            "Crawl completed: {} pages visited in {:?}",
            self.visited.len(),
            start_time.elapsed()
        );

        self.report()
    }

    /// Returns the aggregate report of a finished run
    pub fn report(&self) -> Result<CrawlReport, HarvestError> {
        if self.state != CrawlState::Done {
            return Err(HarvestError::InvalidState {
                expected: CrawlState::Done,
                found: self.state,
            });
        }

        Ok(CrawlReport {
            base_url: self.seed.clone(),
            urls: self.links.clone(),
            emails: self.emails.clone(),
            phones: self.phones.clone(),
            pages_visited: self.visit_order.clone(),
            stats: self.stats.clone(),
        })
    }

    /// Fetches up to `workers` frontier addresses concurrently
    async fn step_batch<F>(&mut self, fetcher: &F) -> Result<CrawlState, HarvestError>
    where
        F: Fetcher + ?Sized,
    {
        let remaining = self.budget.saturating_sub(self.visited.len());
        let batch = self.claim_batch(self.workers.min(remaining));

        if !batch.is_empty() {
            tracing::debug!("Fetching batch of {} pages", batch.len());

            let extractor = &self.extractor;
            let pages: Vec<Page> = stream::iter(batch)
                .map(|address| Page::fetch(address, fetcher, extractor))
                .buffered(self.workers)
                .collect()
                .await;

            for page in pages {
                self.absorb(page)?;
            }
        }

        self.update_state();
        Ok(self.state)
    }

    /// Pops up to `max` distinct, unvisited addresses off the front of the frontier
    fn claim_batch(&mut self, max: usize) -> Vec<String> {
        let mut batch: Vec<String> = Vec::with_capacity(max);

        while batch.len() < max {
            let Some(address) = self.frontier.pop_front() else {
                break;
            };

            if self.visited.contains(&address) || batch.contains(&address) {
                tracing::trace!("Skipping already claimed {}", address);
                self.stats.duplicates_skipped += 1;
                continue;
            }

            batch.push(address);
        }

        batch
    }

    /// Merges one visited page into the run state
    fn absorb(&mut self, page: Page) -> Result<(), HarvestError> {
        match page.status() {
            PageStatus::Fetched { .. } => self.stats.pages_fetched += 1,
            PageStatus::HttpError { .. } => self.stats.http_errors += 1,
            PageStatus::Unreachable { error } => match self.policy {
                TransportFaultPolicy::Abort => {
                    tracing::error!("Aborting crawl, {} unreachable: {}", page.address(), error);
                    return Err(HarvestError::Transport {
                        url: page.address().to_string(),
                        message: error.clone(),
                    });
                }
                TransportFaultPolicy::Skip => {
                    tracing::warn!("Skipping unreachable {}: {}", page.address(), error);
                    self.stats.transport_faults += 1;
                }
            },
        }

        let address = page.address().to_string();
        let discovered = page.into_discovered();

        for link in &discovered.links {
            if *link != address && !self.visited.contains(link) {
                self.frontier.push_back(link.clone());
            }
        }

        tracing::debug!(
            "{}: {} links, {} emails, {} phones",
            address,
            discovered.links.len(),
            discovered.emails.len(),
            discovered.phones.len()
        );

        self.links.extend(discovered.links);
        self.emails.extend(discovered.emails);
        self.phones.extend(discovered.phones);

        self.visited.insert(address.clone());
        self.visit_order.push(address);
        self.stats.pages_visited += 1;

        Ok(())
    }

    fn update_state(&mut self) {
        if self.state == CrawlState::Running
            && (self.visited.len() >= self.budget || self.frontier.is_empty())
        {
            self.state = CrawlState::Done;
        }
    }
}
