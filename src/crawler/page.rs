//! A single fetched page and what was found in it

use crate::crawler::fetcher::{FetchResult, Fetcher};
use crate::extract::{Discovered, Extractor};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// How the fetch for a page resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    /// Body received and mined
    Fetched { status_code: u16 },
    /// Server answered with a non-success status
    HttpError { status_code: u16 },
    /// Transport could not complete the request
    Unreachable { error: String },
}

/// One visited resource
///
/// Two pages are the same page when their addresses are equal; the discovered
/// sets play no part in identity.
#[derive(Debug, Clone)]
pub struct Page {
    address: String,
    status: PageStatus,
    discovered: Discovered,
}

impl Page {
    /// Fetches `address` and mines the body when the fetch succeeded
    ///
    /// A non-success status or a transport failure leaves all discovered sets
    /// empty. This never fails; the caller decides what an unreachable page
    /// means for the run.
    pub async fn fetch<F>(address: impl Into<String>, fetcher: &F, extractor: &Extractor) -> Self
    where
        F: Fetcher + ?Sized,
    {
        let address = address.into();
        let result = fetcher.fetch(&address).await;
        Self::from_result(address, result, extractor)
    }

    /// Builds a page from an already completed fetch
    pub fn from_result(
        address: impl Into<String>,
        result: FetchResult,
        extractor: &Extractor,
    ) -> Self {
        let address = address.into();

        let (status, discovered) = match result {
            FetchResult::Success {
                status_code, body, ..
            } => (
                PageStatus::Fetched { status_code },
                extractor.extract(&body),
            ),
            FetchResult::HttpError { status_code } => {
                tracing::debug!("{} answered HTTP {}", address, status_code);
                (PageStatus::HttpError { status_code }, Discovered::default())
            }
            FetchResult::NetworkError { error } => {
                tracing::debug!("{} unreachable: {}", address, error);
                (PageStatus::Unreachable { error }, Discovered::default())
            }
        };

        Self {
            address,
            status,
            discovered,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn status(&self) -> &PageStatus {
        &self.status
    }

    pub fn links(&self) -> &BTreeSet<String> {
        &self.discovered.links
    }

    pub fn emails(&self) -> &BTreeSet<String> {
        &self.discovered.emails
    }

    pub fn phones(&self) -> &BTreeSet<String> {
        &self.discovered.phones
    }

    /// Consumes the page, keeping only what it discovered
    pub fn into_discovered(self) -> Discovered {
        self.discovered
    }
}

impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for Page {}

impl Hash for Page {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
    }
}
