//! Crawling engine
//!
//! Breadth-first, single-connection, and deliberately slow: one fetch at a
//! time with a fixed politeness delay in between. The coordinator wires the
//! frontier, fetcher, and link parser together for one run.

pub mod coordinator;
pub mod fetcher;
pub mod frontier;
pub mod parser;

pub use coordinator::{Coordinator, CrawlOutcome};
pub use fetcher::{build_http_client, fetch_page, FetchError, RetryPolicy};
pub use frontier::{Frontier, FrontierEntry};
pub use parser::extract_links;
