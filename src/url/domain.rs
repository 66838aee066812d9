use crate::UrlError;
use url::Url;

/// Extracts the domain from a URL
///
/// Returns the lowercase host, or `None` if the URL has no host.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use domain_harvester::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Derives the crawl domain from a seed URL
///
/// A leading `www.` is dropped so that a seed of `https://www.example.com`
/// follows links on `example.com` and all of its subdomains.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use domain_harvester::url::seed_domain;
///
/// let url = Url::parse("https://www.bowdoin.edu/").unwrap();
/// assert_eq!(seed_domain(&url).unwrap(), "bowdoin.edu");
/// ```
pub fn seed_domain(url: &Url) -> Result<String, UrlError> {
    let host = extract_domain(url).ok_or(UrlError::MissingDomain)?;

    match host.strip_prefix("www.") {
        Some(rest) if !rest.is_empty() => Ok(rest.to_string()),
        _ => Ok(host),
    }
}
