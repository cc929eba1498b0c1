use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use scraper::Html;
use tracing::{debug, info, warn};

use crate::config::{AppConfig, HttpConfig};
use crate::error::{FetchCause, FetchError};
use crate::models::PageTarget;

/// How long a fetched page set is served before the next call re-fetches it.
pub const CACHE_TTL: Duration = Duration::from_secs(120);

/// Source of raw page bodies. The production implementation is `HttpFetcher`.
pub trait PageFetcher {
    fn get(&self, url: &str) -> Result<String, FetchCause>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn get(&self, url: &str) -> Result<String, FetchCause> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchCause::Status(status.as_u16()));
        }
        Ok(response.text()?)
    }
}

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Whether the last `documents()` call hit the network. Diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Fetched,
    Cached,
}

struct CachedPage {
    target: PageTarget,
    document: Html,
}

/// Parsed documents keyed by page target, kept in configured page order.
#[derive(Default)]
pub struct DocumentSet {
    pages: Vec<CachedPage>,
}

impl DocumentSet {
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, target: &PageTarget) -> Option<&Html> {
        self.pages
            .iter()
            .find(|page| &page.target == target)
            .map(|page| &page.document)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PageTarget, &Html)> {
        self.pages.iter().map(|page| (&page.target, &page.document))
    }
}

/// Time-based cache over the configured listing pages.
///
/// The whole page set is fetched in one cycle; a failure on any page leaves
/// the cache empty and the last fetch time untouched so the next call retries
/// every page.
pub struct FetchCache<F = HttpFetcher, C = SystemClock> {
    origin: String,
    targets: Vec<PageTarget>,
    fetcher: F,
    clock: C,
    ttl: Duration,
    documents: DocumentSet,
    last_fetch: Option<Instant>,
    last_status: Option<CacheStatus>,
}

impl FetchCache<HttpFetcher, SystemClock> {
    pub fn from_config(config: &AppConfig, pages: usize) -> Result<Self, reqwest::Error> {
        let fetcher = HttpFetcher::new(&config.http)?;
        Ok(Self::new(
            config.origin.clone(),
            config.page_targets(pages),
            fetcher,
            SystemClock,
        ))
    }
}

impl<F: PageFetcher, C: Clock> FetchCache<F, C> {
    pub fn new(origin: impl Into<String>, targets: Vec<PageTarget>, fetcher: F, clock: C) -> Self {
        Self {
            origin: origin.into(),
            targets,
            fetcher,
            clock,
            ttl: CACHE_TTL,
            documents: DocumentSet::default(),
            last_fetch: None,
            last_status: None,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn targets(&self) -> &[PageTarget] {
        &self.targets
    }

    pub fn last_fetch(&self) -> Option<Instant> {
        self.last_fetch
    }

    /// How the last successful `documents` call was served; `None` before the
    /// first success and after a failed refresh.
    pub fn last_status(&self) -> Option<CacheStatus> {
        self.last_status
    }

    fn is_fresh(&self, now: Instant) -> bool {
        if self.documents.is_empty() {
            return false;
        }
        match self.last_fetch {
            Some(fetched_at) => now.saturating_duration_since(fetched_at) < self.ttl,
            None => false,
        }
    }

    /// Return the current page set, re-fetching every page when the cache is
    /// empty or at least `CACHE_TTL` old.
    pub fn documents(&mut self) -> Result<&DocumentSet, FetchError> {
        let now = self.clock.now();
        if self.is_fresh(now) {
            debug!(target: "fetch", pages = self.documents.len(), "cached");
            self.last_status = Some(CacheStatus::Cached);
            return Ok(&self.documents);
        }

        self.refresh(now)?;
        Ok(&self.documents)
    }

    fn refresh(&mut self, now: Instant) -> Result<(), FetchError> {
        self.documents = DocumentSet::default();
        self.last_status = None;
        info!(target: "fetch", origin = %self.origin, pages = self.targets.len(), "fetching");

        let mut pages = Vec::with_capacity(self.targets.len());
        for target in &self.targets {
            let url = target.url(&self.origin);
            let body = match self.fetcher.get(&url) {
                Ok(body) => body,
                Err(cause) => {
                    warn!(
                        target: "fetch",
                        url = %url,
                        error = %cause,
                        "page fetch failed, aborting refresh"
                    );
                    return Err(FetchError {
                        target: target.clone(),
                        url,
                        cause,
                    });
                }
            };
            debug!(target: "fetch", url = %url, bytes = body.len(), "page fetched");
            pages.push(CachedPage {
                target: target.clone(),
                document: Html::parse_document(&body),
            });
        }

        self.documents = DocumentSet { pages };
        self.last_fetch = Some(now);
        self.last_status = Some(CacheStatus::Fetched);
        Ok(())
    }
}
