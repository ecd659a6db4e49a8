//! End-of-run reporting
//!
//! A crawl always completes and reports its counts, even when every fetch
//! failed; only the operator can decide whether a partial run is useful.

use std::time::Duration;

/// Counters accumulated over one crawl run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Fetch attempts consumed from the page budget
    pub pages_visited: u32,

    /// Pages whose fetch failed after all retries
    pub fetch_failures: u32,

    /// Pages fetched fine but carrying no qualifying table
    pub pages_without_table: u32,

    /// Raw records extracted across all pages (before date-key dedup)
    pub records_extracted: u64,

    /// Records quarantined because year or month stayed unresolved
    pub unresolved_dates: u64,

    /// Distinct dates in the final dataset
    pub dataset_size: u64,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunReport {
    /// Pages that produced at least a fetched body
    pub fn pages_fetched(&self) -> u32 {
        self.pages_visited.saturating_sub(self.fetch_failures)
    }
}

/// Prints the run report to stdout
pub fn print_report(report: &RunReport) {
    println!("=== Crawl Report ===\n");
    println!("Pages visited:      {}", report.pages_visited);
    println!("Fetch failures:     {}", report.fetch_failures);
    println!("Pages w/o table:    {}", report.pages_without_table);
    println!("Records extracted:  {}", report.records_extracted);
    println!("Unresolved dates:   {}", report.unresolved_dates);
    println!("Dataset size:       {} days", report.dataset_size);
    println!("Elapsed:            {:.1?}", report.elapsed);

    if report.pages_visited > 0 {
        let rate = report.pages_fetched() as f64 / report.pages_visited as f64 * 100.0;
        println!("Fetch success rate: {:.1}%", rate);
    }
}
