use url::Url;

/// Extracts the host from a URL, lowercased
///
/// Returns None if the URL has no host (which shouldn't happen for valid
/// HTTP(S) URLs).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use chartrake::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Tests whether a host falls within the crawl scope of a seed host
///
/// A host is in scope when it equals the seed host or is a subdomain of it.
/// This keeps the page budget from being burned on external sites.
///
/// # Examples
///
/// ```
/// use chartrake::url::host_in_scope;
///
/// assert!(host_in_scope("example.com", "example.com"));
/// assert!(host_in_scope("charts.example.com", "example.com"));
/// assert!(!host_in_scope("example.com.evil.net", "example.com"));
/// assert!(!host_in_scope("other.com", "example.com"));
/// ```
pub fn host_in_scope(host: &str, seed_host: &str) -> bool {
    let host = host.to_lowercase();
    let seed_host = seed_host.to_lowercase();

    host == seed_host || host.ends_with(&format!(".{}", seed_host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_host() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_subdomain() {
        let url = Url::parse("https://charts.example.com/2024").unwrap();
        assert_eq!(extract_host(&url), Some("charts.example.com".to_string()));
    }

    #[test]
    fn test_extract_lowercases() {
        let url = Url::parse("https://Example.COM/").unwrap();
        assert_eq!(extract_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_with_port() {
        let url = Url::parse("http://127.0.0.1:8080/").unwrap();
        assert_eq!(extract_host(&url), Some("127.0.0.1".to_string()));
    }

    #[test]
    fn test_same_host_in_scope() {
        assert!(host_in_scope("example.com", "example.com"));
    }

    #[test]
    fn test_subdomain_in_scope() {
        assert!(host_in_scope("www.example.com", "example.com"));
        assert!(host_in_scope("a.b.example.com", "example.com"));
    }

    #[test]
    fn test_suffix_confusion_not_in_scope() {
        // "notexample.com" ends with "example.com" as a string but is a
        // different registrable domain
        assert!(!host_in_scope("notexample.com", "example.com"));
    }

    #[test]
    fn test_other_host_not_in_scope() {
        assert!(!host_in_scope("other.org", "example.com"));
    }

    #[test]
    fn test_scope_is_case_insensitive() {
        assert!(host_in_scope("WWW.Example.com", "example.COM"));
    }
}
