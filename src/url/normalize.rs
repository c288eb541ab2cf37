use crate::UrlError;
use url::Url;

/// Normalizes a URL into the identity used by the crawl frontier
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject anything that is not HTTP(S)
/// 3. Lowercase the scheme and host
/// 4. Remove the fragment (everything after #)
///
/// Path and query string are preserved verbatim, so `?page=2` and
/// `?page=3` remain distinct pages.
///
/// # Examples
///
/// ```
/// use site_harvester::url::normalize_url;
///
/// let url = normalize_url("HTTPS://EEMB.UCSB.EDU/People?tab=Faculty#top").unwrap();
/// assert_eq!(url.as_str(), "https://eemb.ucsb.edu/People?tab=Faculty");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    // The parser lowercases special-scheme hosts already; this also covers
    // hosts it leaves untouched.
    let host = url
        .host_str()
        .map(|h| h.to_lowercase())
        .ok_or(UrlError::MissingHost)?;
    url.set_host(Some(&host))
        .map_err(|e| UrlError::Parse(format!("Failed to set host: {}", e)))?;

    url.set_fragment(None);

    Ok(url)
}

/// Resolves an href against the page it appeared on and normalizes it
///
/// Returns None for hrefs that do not lead to a fetchable page:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel:, data: schemes
/// - anything that fails to resolve to an HTTP(S) URL
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    normalize_url(absolute.as_str()).ok()
}
