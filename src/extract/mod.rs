//! Text-mining rules for fetched pages
//!
//! Everything in this module is pure: functions take page text and return
//! sets of matches, never perform I/O, and never fail. An input with nothing
//! recognizable simply produces an empty set.
//!
//! - [`extract_links`]: same-domain, `https` anchor targets that look like pages
//! - [`extract_emails`]: `local@domain.tld` shaped substrings
//! - [`extract_phones`]: North-American numbers normalized to `NPA-NXX-XXXX`

mod emails;
mod links;
mod phones;

use std::collections::BTreeSet;

pub use emails::extract_emails;
pub use links::{extract_links, DEFAULT_EXCLUDED_EXTENSIONS};
pub use phones::extract_phones;

/// Everything discovered in one page body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovered {
    pub links: BTreeSet<String>,
    pub emails: BTreeSet<String>,
    pub phones: BTreeSet<String>,
}

impl Discovered {
    /// Returns true if nothing at all was discovered
    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.emails.is_empty() && self.phones.is_empty()
    }
}

/// Extraction settings for one crawl
///
/// Holds the crawl domain and the list of file extensions whose links are not
/// followed. One extractor is built per run and shared by every page.
#[derive(Debug, Clone)]
pub struct Extractor {
    domain: String,
    excluded_extensions: Vec<String>,
}

impl Extractor {
    /// Creates an extractor for `domain` with the default excluded extensions
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into().trim().to_lowercase(),
            excluded_extensions: DEFAULT_EXCLUDED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }

    /// Adds more extensions to reject, on top of the defaults
    pub fn with_excluded_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for ext in extensions {
            let ext = ext.as_ref().trim_start_matches('.').to_lowercase();
            if !ext.is_empty() && !self.excluded_extensions.contains(&ext) {
                self.excluded_extensions.push(ext);
            }
        }
        self
    }

    /// The domain whose links are followed
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The extensions whose links are rejected
    pub fn excluded_extensions(&self) -> &[String] {
        &self.excluded_extensions
    }

    /// Same-domain page links in `text`
    pub fn links(&self, text: &str) -> BTreeSet<String> {
        links::collect_links(text, &self.domain, &self.excluded_extensions)
    }

    /// Runs all three extractors over `text`
    pub fn extract(&self, text: &str) -> Discovered {
        Discovered {
            links: self.links(text),
            emails: extract_emails(text),
            phones: extract_phones(text),
        }
    }
}
