use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use url::Url;

/// Extensions of media, document and archive files that are never followed
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "svg", "png", "pdf", "gif", "bmp", "mp3", "dvi"];

lazy_static! {
    // <a ... href="target"> with either quote style. The attribute name must
    // follow whitespace, so `data-href` and friends are not mistaken for it.
    static ref ANCHOR_HREF_REGEX: Regex =
        Regex::new(r#"(?is)<a\s(?:[^>]*?\s)?href\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap();
}

/// Extracts same-domain page links from raw page text
///
/// Only anchors whose target is an absolute `https` URL on `domain` (or one of
/// its subdomains) are returned. Targets whose path ends with one of
/// [`DEFAULT_EXCLUDED_EXTENSIONS`] are dropped. Links to other domains are
/// ignored without comment.
///
/// # Examples
///
/// ```
/// use domain_harvester::extract_links;
///
/// let html = r#"<a href="https://example.com/page.html">x</a>
///               <a href="https://example.com/page.pdf">y</a>"#;
/// let links = extract_links(html, "example.com");
/// assert!(links.contains("https://example.com/page.html"));
/// assert!(!links.contains("https://example.com/page.pdf"));
/// ```
pub fn extract_links(text: &str, domain: &str) -> BTreeSet<String> {
    let excluded: Vec<String> = DEFAULT_EXCLUDED_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect();
    collect_links(text, &domain.trim().to_lowercase(), &excluded)
}

pub(crate) fn collect_links(text: &str, domain: &str, excluded: &[String]) -> BTreeSet<String> {
    ANCHOR_HREF_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().trim())
        .filter(|href| is_page_link(href, domain, excluded))
        .map(str::to_string)
        .collect()
}

/// Decides whether an href is an in-domain, secure link to a page
fn is_page_link(href: &str, domain: &str, excluded: &[String]) -> bool {
    let url = match Url::parse(href) {
        Ok(url) => url,
        Err(_) => return false,
    };

    if url.scheme() != "https" {
        return false;
    }

    match url.host_str() {
        Some(host) if host_in_domain(host, domain) => {}
        _ => return false,
    }

    !has_excluded_extension(url.path(), excluded)
}

/// True for `domain` itself and any subdomain of it
fn host_in_domain(host: &str, domain: &str) -> bool {
    let host = host.to_lowercase();
    host == domain
        || host
            .strip_suffix(domain)
            .map_or(false, |prefix| prefix.ends_with('.'))
}

fn has_excluded_extension(path: &str, excluded: &[String]) -> bool {
    let path = path.to_lowercase();
    excluded
        .iter()
        .any(|ext| path.ends_with(&format!(".{}", ext)))
}
