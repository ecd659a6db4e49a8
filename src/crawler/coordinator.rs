//! Crawler coordinator - main crawl orchestration logic
//!
//! Owns the frontier, the HTTP client, and the accumulating dataset for one
//! run. Drives fetch -> extract -> date-resolve -> accumulate per page,
//! discovers same-domain links, and enforces the page and depth budgets.
//! Nothing here survives across runs.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page, RetryPolicy};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::extract_links;
use crate::extract::{extract_first_table, page_context, resolve};
use crate::output::stats::RunReport;
use crate::records::{Dataset, Record};
use crate::url::{in_scope, normalize_url};
use crate::{ChartrakeError, Result};
use reqwest::Client;
use scraper::Html;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Result of one completed crawl run
#[derive(Debug)]
pub struct CrawlOutcome {
    /// The accumulated, date-keyed dataset (quarantine included)
    pub dataset: Dataset,

    /// End-of-run counters
    pub report: RunReport,
}

/// Everything extracted from one fetched page body
///
/// Built synchronously so the non-Send HTML DOM never crosses an await.
struct PageResult {
    records: Vec<Record>,
    links: Vec<Url>,
    table_found: bool,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    policy: RetryPolicy,
    seeds: Vec<Url>,
    stop: Arc<AtomicBool>,
}

impl Coordinator {
    /// Creates a new coordinator for one run
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.crawler.timeout_secs),
        )?;

        let policy = RetryPolicy {
            max_attempts: config.crawler.max_retries,
            backoff_base: Duration::from_millis(config.crawler.backoff_base_ms),
        };

        let mut seeds = Vec::new();
        for entry in &config.seed {
            seeds.push(normalize_url(&entry.url)?);
        }
        if seeds.is_empty() {
            return Err(ChartrakeError::Config(crate::ConfigError::Validation(
                "no seed URLs configured".to_string(),
            )));
        }

        Ok(Self {
            config,
            client,
            policy,
            seeds,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Returns a handle that aborts the crawl between frontier iterations
    ///
    /// Records accumulated up to the abort point are kept and returned.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Runs the crawl to completion (budget exhausted, frontier empty, or
    /// stop requested) and returns the accumulated dataset and report
    pub async fn run(&mut self) -> Result<CrawlOutcome> {
        let start = std::time::Instant::now();
        let mut frontier = Frontier::new();
        let mut dataset = Dataset::new();
        let mut report = RunReport::default();

        for seed in self.seeds.clone() {
            frontier.enqueue(seed, 0);
        }

        let delay = Duration::from_millis(self.config.crawler.request_delay_ms);
        let max_pages = self.config.crawler.max_pages;
        let max_depth = self.config.crawler.max_depth;

        while let Some(entry) = frontier.next() {
            if self.stop.load(Ordering::Relaxed) {
                tracing::info!("Stop requested, flushing {} records", dataset.len());
                break;
            }

            if report.pages_visited >= max_pages {
                tracing::info!("Page budget of {} exhausted", max_pages);
                break;
            }

            // Politeness: fixed delay between consecutive fetches
            if report.pages_visited > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            report.pages_visited += 1;
            tracing::debug!(
                "Fetching ({}/{}) depth={}: {}",
                report.pages_visited,
                max_pages,
                entry.depth,
                entry.url
            );

            let body = match fetch_page(&self.client, &entry.url, &self.policy).await {
                Ok(body) => body,
                Err(e) => {
                    // Fetcher already exhausted its retries; skip the page
                    tracing::debug!("Skipping {}: {}", e.url, e.last_cause);
                    report.fetch_failures += 1;
                    continue;
                }
            };

            let page = self.process_body(&body, &entry.url);

            if page.table_found {
                tracing::info!("Found {} records on {}", page.records.len(), entry.url);
                report.records_extracted += page.records.len() as u64;
                for record in page.records {
                    dataset.insert(record);
                }
            } else {
                report.pages_without_table += 1;
            }

            if entry.depth < max_depth {
                for link in page.links {
                    if self.seeds.iter().any(|seed| in_scope(&link, seed)) {
                        frontier.enqueue(link, entry.depth + 1);
                    }
                }
            }
        }

        dataset.retain_years(self.config.dates.min_year, self.config.dates.max_year);

        report.unresolved_dates = dataset.quarantine_len() as u64;
        report.dataset_size = dataset.len() as u64;
        report.elapsed = start.elapsed();

        tracing::info!(
            "Crawl finished: {} pages, {} days of data, {} fetch failures",
            report.pages_visited,
            report.dataset_size,
            report.fetch_failures
        );

        Ok(CrawlOutcome { dataset, report })
    }

    /// Parses one body and extracts records, links and date context
    ///
    /// Synchronous on purpose: the DOM is built, read, and dropped here.
    fn process_body(&self, body: &str, page_url: &Url) -> PageResult {
        let document = Html::parse_document(body);

        let links = extract_links(&document, page_url);

        let extraction = extract_first_table(
            &document,
            &self.config.fields,
            &self.config.extract,
            page_url.as_str(),
        );

        let (records, table_found) = match extraction {
            Some(extraction) => {
                let mut context = page_context(&document);
                context.push(' ');
                context.push_str(&extraction.header_text);

                let resolved = resolve(
                    &context,
                    page_url,
                    self.config.dates.min_year,
                    self.config.dates.max_year,
                );

                if resolved.year.is_none() || resolved.month.is_none() {
                    tracing::debug!(
                        "Unresolved date context on {} (year={:?}, month={:?})",
                        page_url,
                        resolved.year,
                        resolved.month
                    );
                }

                // Stamp the page-level date context onto every row
                let mut records = extraction.records;
                for record in &mut records {
                    record.year = resolved.year;
                    record.month = resolved.month;
                }

                (records, true)
            }
            None => (Vec::new(), false),
        };

        PageResult {
            records,
            links,
            table_found,
        }
    }
}
