use url::Url;

/// Returns the network location (host plus explicit port) of a URL
///
/// The host is lowercased; a default port is omitted, matching how the
/// URL would be written in an address bar.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_harvester::url::network_location;
///
/// let url = Url::parse("https://EEMB.ucsb.edu/people").unwrap();
/// assert_eq!(network_location(&url), Some("eemb.ucsb.edu".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(network_location(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn network_location(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}

/// Returns true if both URLs share the same network location
///
/// Scheme and path are ignored; only host and port are compared.
pub fn is_same_domain(a: &Url, b: &Url) -> bool {
    match (network_location(a), network_location(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
