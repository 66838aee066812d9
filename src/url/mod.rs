//! URL handling module for Domain Harvester
//!
//! This module validates seed addresses and derives the domain whose links the
//! crawler follows.

mod domain;

use crate::UrlError;
use url::Url;

pub use domain::{extract_domain, seed_domain};

/// Parses and validates a seed address
///
/// The seed must be an absolute `http` or `https` URL with a host. Plain HTTP
/// is accepted for the seed itself so local servers can be crawled, even
/// though only secure-scheme links are followed from there.
///
/// # Examples
///
/// ```
/// use domain_harvester::url::parse_seed;
///
/// let url = parse_seed("https://example.com/start").unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
///
/// assert!(parse_seed("ftp://example.com/").is_err());
/// assert!(parse_seed("not a url").is_err());
/// ```
pub fn parse_seed(seed: &str) -> Result<Url, UrlError> {
    let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}
