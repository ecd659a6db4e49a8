//! Link discovery from fetched pages

use crate::url::normalize_url;
use scraper::{Html, Selector};
use url::Url;

/// Extracts all followable links from the document as normalized URLs
///
/// Excluded:
/// - `javascript:`, `mailto:`, `tel:` and `data:` hrefs
/// - fragment-only links (same-page anchors)
/// - `<a ... download>` links
/// - anything that resolves to a non-http(s) URL
pub fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(url) = resolve_link(href, base_url) {
                    links.push(url);
                }
            }
        }
    }

    links
}

/// Resolves one href against the base URL, applying the exclusion rules
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    normalize_url(absolute.as_str()).ok()
}
