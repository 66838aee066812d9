//! Integration tests for the crawler
//!
//! HTTP behavior is tested against wiremock servers. Traversal scenarios use
//! an in-memory fetcher, since wiremock serves plain HTTP and the crawler only
//! follows `https` links.

use async_trait::async_trait;
use domain_harvester::config::{Config, TransportFaultPolicy};
use domain_harvester::crawler::{
    crawl, crawl_to_file, CrawlState, Crawler, FetchResult, Fetcher, HttpFetcher,
};
use domain_harvester::extract::Extractor;
use domain_harvester::output::{format_report, CrawlStats};
use domain_harvester::HarvestError;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Mutex;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration that stays on `example.com`
fn create_test_config(max_pages: usize) -> Config {
    let mut config = Config::default();
    config.crawler.max_pages = max_pages;
    config.extract.domain = Some("example.com".to_string());
    config.http.timeout_secs = 5;
    config.http.connect_timeout_secs = 2;
    config
}

/// In-memory site keyed by URL; unknown URLs answer 404
#[derive(Default)]
struct SiteFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl SiteFetcher {
    fn with_page(mut self, url: &str, links: &[&str], extra: &str) -> Self {
        let mut body = String::from("<html><body>");
        for link in links {
            body.push_str(&format!(r#"<a href="{}">{}</a>"#, link, link));
        }
        body.push_str(extra);
        body.push_str("</body></html>");
        self.pages.insert(url.to_string(), body);
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for SiteFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        self.requests.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(body) => FetchResult::Success {
                final_url: url.to_string(),
                status_code: 200,
                body: body.clone(),
            },
            None => FetchResult::HttpError { status_code: 404 },
        }
    }
}

const SEED: &str = "https://example.com";
const PAGE_A: &str = "https://example.com/a";
const PAGE_B: &str = "https://example.com/b";

fn interlinked_site() -> SiteFetcher {
    SiteFetcher::default()
        .with_page(SEED, &[PAGE_A], "")
        .with_page(PAGE_A, &[PAGE_B, SEED], "dean@example.com")
        .with_page(PAGE_B, &[PAGE_A, SEED], "(207) 725-3000")
}

#[tokio::test]
async fn test_interlinked_pages_with_budget_two() {
    let fetcher = interlinked_site();
    let mut crawler = Crawler::new(SEED, 2, Extractor::new("example.com"));

    let report = crawler.run(&fetcher).await.expect("crawl should succeed");

    assert_eq!(crawler.state(), CrawlState::Done);
    assert_eq!(crawler.visited().len(), 2);
    assert_eq!(report.pages_visited, vec![SEED, PAGE_A]);

    // every link seen on either visited page, cycles included
    let expected: BTreeSet<String> = [SEED, PAGE_A, PAGE_B]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(report.urls, expected);
    assert_eq!(
        report.emails,
        BTreeSet::from(["dean@example.com".to_string()])
    );
    // page b was never visited, so its phone number is not reported
    assert!(report.phones.is_empty());
}

#[tokio::test]
async fn test_frontier_exhaustion_ends_early() {
    let fetcher = interlinked_site();
    let mut crawler = Crawler::new(SEED, 50, Extractor::new("example.com"));

    let report = crawler.run(&fetcher).await.unwrap();

    assert_eq!(crawler.state(), CrawlState::Done);
    assert_eq!(report.pages_visited, vec![SEED, PAGE_A, PAGE_B]);
    assert_eq!(fetcher.requests().len(), 3);
    assert!(report.phones.contains("207-725-3000"));
}

#[tokio::test]
async fn test_budget_bound_holds_for_every_budget() {
    // a small graph where every page links to every other page
    let pages: Vec<String> = (0..5)
        .map(|i| format!("https://example.com/p{}", i))
        .collect();
    let links: Vec<&str> = pages.iter().map(String::as_str).collect();

    let mut fetcher = SiteFetcher::default().with_page(SEED, &links, "");
    for page in &pages {
        fetcher = fetcher.with_page(page, &links, "");
    }

    for budget in 0..9 {
        let mut crawler = Crawler::new(SEED, budget, Extractor::new("example.com"));
        let report = crawler.run(&fetcher).await.unwrap();

        let expected = budget.min(pages.len() + 1);
        assert_eq!(report.pages_visited.len(), expected, "budget {}", budget);

        let distinct: HashSet<&String> = report.pages_visited.iter().collect();
        assert_eq!(distinct.len(), report.pages_visited.len());
    }
}

#[tokio::test]
async fn test_aggregates_equal_union_of_visited_pages() {
    let fetcher = SiteFetcher::default()
        .with_page(SEED, &[PAGE_A, PAGE_B], "one@example.com 207-725-3001")
        .with_page(PAGE_A, &["https://example.com/c"], "two@example.com")
        .with_page(PAGE_B, &[], "207.725.3002")
        .with_page("https://example.com/c", &[], "never@example.com");

    let mut crawler = Crawler::new(SEED, 3, Extractor::new("example.com"));
    let report = crawler.run(&fetcher).await.unwrap();

    assert_eq!(report.pages_visited, vec![SEED, PAGE_A, PAGE_B]);
    assert_eq!(
        report.urls,
        BTreeSet::from([
            PAGE_A.to_string(),
            PAGE_B.to_string(),
            "https://example.com/c".to_string()
        ])
    );
    assert_eq!(
        report.emails,
        BTreeSet::from(["one@example.com".to_string(), "two@example.com".to_string()])
    );
    assert_eq!(
        report.phones,
        BTreeSet::from(["207-725-3001".to_string(), "207-725-3002".to_string()])
    );
}

#[tokio::test]
async fn test_concurrent_workers_match_sequential_run() {
    let fetcher = interlinked_site();

    let mut sequential = Crawler::new(SEED, 3, Extractor::new("example.com"));
    let expected = sequential.run(&fetcher).await.unwrap();

    let mut concurrent = Crawler::new(SEED, 3, Extractor::new("example.com")).with_workers(8);
    let actual = concurrent.run(&fetcher).await.unwrap();

    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_http_seed_page_is_mined() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(
                    r#"<html><body>
                    <a href="https://example.com/about">About</a>
                    <a href="https://example.com/map.png">Map</a>
                    <a href="https://elsewhere.org/">Elsewhere</a>
                    <p>registrar@example.com | (207) 725-3000</p>
                    </body></html>"#,
                )
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = crawl(&format!("{}/", base_url), &create_test_config(1))
        .await
        .expect("crawl should succeed");

    assert_eq!(report.pages_visited.len(), 1);
    assert_eq!(
        report.urls,
        BTreeSet::from(["https://example.com/about".to_string()])
    );
    assert!(report.emails.contains("registrar@example.com"));
    assert!(report.phones.contains("207-725-3000"));
}

#[tokio::test]
async fn test_http_error_seed_yields_empty_report() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"<a href="https://example.com/x">x</a>"#),
        )
        .mount(&mock_server)
        .await;

    let seed = format!("{}/", mock_server.uri());
    let config = create_test_config(10);
    let mut crawler = Crawler::from_config(&seed, &config).unwrap();
    let fetcher = HttpFetcher::new(&config.user_agent, &config.http).unwrap();

    let report = crawler.run(&fetcher).await.unwrap();

    assert_eq!(crawler.state(), CrawlState::Done);
    assert_eq!(report.pages_visited, vec![seed]);
    assert!(report.urls.is_empty());
    assert!(report.emails.is_empty());
    assert!(report.phones.is_empty());
    assert_eq!(report.stats.http_errors, 1);
}

#[tokio::test]
async fn test_unreachable_seed_aborts() {
    let config = create_test_config(10);

    let result = crawl("http://127.0.0.1:9/", &config).await;

    assert!(matches!(result, Err(HarvestError::Transport { .. })));
}

#[tokio::test]
async fn test_unreachable_seed_skipped_with_policy() {
    let mut config = create_test_config(10);
    config.crawler.on_transport_fault = TransportFaultPolicy::Skip;

    let report = crawl("http://127.0.0.1:9/", &config).await.unwrap();

    assert_eq!(report.pages_visited, vec!["http://127.0.0.1:9/"]);
    assert!(report.is_empty());
    assert_eq!(report.stats.transport_faults, 1);
}

#[tokio::test]
async fn test_report_file_written() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("Phone 207 725 3000, mail office@example.com"),
        )
        .mount(&mock_server)
        .await;

    let seed = format!("{}/contact", mock_server.uri());
    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("data.txt");

    let report = crawl_to_file(&seed, &create_test_config(1), &report_path)
        .await
        .unwrap();

    let stats: &CrawlStats = &report.stats;
    assert_eq!(stats.pages_visited, 1);
    assert_eq!(stats.pages_fetched, 1);

    let written = std::fs::read_to_string(&report_path).unwrap();
    assert_eq!(written, format_report(&report));
    assert_eq!(
        written,
        format!(
            "Base URL: {}\n\nURLs:\n\nEmails:\noffice@example.com\n\nPhones:\n207-725-3000\n",
            seed
        )
    );
}

#[tokio::test]
async fn test_unwritable_report_path_is_output_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("mail office@example.com"))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("missing").join("data.txt");

    let result = crawl_to_file(&mock_server.uri(), &create_test_config(1), &report_path).await;

    assert!(matches!(result, Err(HarvestError::Output(_))));
    assert!(!report_path.exists());
}
