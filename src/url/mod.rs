//! URL handling module for chartrake
//!
//! This module provides URL normalization, host extraction, and the
//! same-domain scope test the crawler uses when deciding whether a
//! discovered link may be enqueued.

mod domain;
mod normalize;

pub use domain::{extract_host, host_in_scope};
pub use normalize::normalize_url;

use url::Url;

/// Tests whether a URL falls within the crawl scope of a seed URL
///
/// A URL is in scope when its host equals the seed's host or is a subdomain
/// of it. URLs without a host are never in scope.
pub fn in_scope(url: &Url, seed: &Url) -> bool {
    match (extract_host(url), extract_host(seed)) {
        (Some(host), Some(seed_host)) => host_in_scope(&host, &seed_host),
        _ => false,
    }
}
