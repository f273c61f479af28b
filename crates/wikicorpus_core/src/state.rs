use std::collections::HashSet;

use crate::{normalize_url, CrawlOutcome, DiscoveredUrls};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrawlPhase {
    #[default]
    Fetching,
    Extracting,
    Advancing,
    Done,
    Failed,
}

impl CrawlPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, CrawlPhase::Done | CrawlPhase::Failed)
    }
}

/// State of one pagination crawl. Only [`crate::update`] mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlState {
    phase: CrawlPhase,
    visited_index_pages: usize,
    discovered: DiscoveredUrls,
    next_index_url: Option<String>,
    in_flight: Option<String>,
    seen_index_urls: HashSet<String>,
    outcome: Option<CrawlOutcome>,
}

impl CrawlState {
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            phase: CrawlPhase::Fetching,
            visited_index_pages: 0,
            discovered: DiscoveredUrls::new(),
            next_index_url: Some(start_url.into()),
            in_flight: None,
            seen_index_urls: HashSet::new(),
            outcome: None,
        }
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn visited_index_pages(&self) -> usize {
        self.visited_index_pages
    }

    pub fn discovered(&self) -> &DiscoveredUrls {
        &self.discovered
    }

    pub fn next_index_url(&self) -> Option<&str> {
        self.next_index_url.as_deref()
    }

    /// Index page currently being fetched or processed.
    pub fn current_index_url(&self) -> Option<&str> {
        self.in_flight.as_deref()
    }

    pub fn outcome(&self) -> Option<&CrawlOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn into_discovered(self) -> DiscoveredUrls {
        self.discovered
    }

    pub(crate) fn has_started(&self) -> bool {
        !self.seen_index_urls.is_empty()
    }

    /// Take the pending next-page URL and mark it in flight.
    /// Returns `None` when nothing is pending.
    pub(crate) fn begin_fetch(&mut self) -> Option<String> {
        let url = self.next_index_url.take()?;
        self.seen_index_urls.insert(index_key(&url));
        self.in_flight = Some(url.clone());
        self.phase = CrawlPhase::Fetching;
        Some(url)
    }

    pub(crate) fn was_visited(&self, url: &str) -> bool {
        self.seen_index_urls.contains(&index_key(url))
    }

    pub(crate) fn record_page_fetched(&mut self) {
        self.visited_index_pages += 1;
        self.phase = CrawlPhase::Extracting;
    }

    pub(crate) fn record_discovery(&mut self, candidates: Vec<String>, next_page: Option<String>) {
        self.discovered.merge(candidates);
        self.next_index_url = next_page;
        self.phase = CrawlPhase::Advancing;
    }

    pub(crate) fn finish(&mut self, outcome: CrawlOutcome) -> CrawlOutcome {
        self.phase = if outcome.is_halted() {
            CrawlPhase::Failed
        } else {
            CrawlPhase::Done
        };
        self.next_index_url = None;
        self.outcome = Some(outcome.clone());
        outcome
    }
}

fn index_key(url: &str) -> String {
    normalize_url(url).unwrap_or_else(|| url.to_string())
}
