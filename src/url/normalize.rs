use crate::{ChartrakeError, Result};
use url::Url;

/// Normalizes a URL string into a canonical `Url`
///
/// Normalization keeps the visited-set honest: two spellings of the same
/// page must compare equal or the crawler will fetch it twice.
///
/// Rules applied:
/// - parse and reject anything that is not http(s)
/// - drop the fragment (same-page anchors are the same page)
/// - lowercase the host (done by the `url` crate on parse)
/// - treat an empty path as "/"
///
/// # Examples
///
/// ```
/// use chartrake::url::normalize_url;
///
/// let url = normalize_url("https://Example.com/chart#march").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/chart");
/// ```
pub fn normalize_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ChartrakeError::UrlParse(
            url::ParseError::RelativeUrlWithoutBase,
        ));
    }

    url.set_fragment(None);

    if url.path().is_empty() {
        url.set_path("/");
    }

    Ok(url)
}
