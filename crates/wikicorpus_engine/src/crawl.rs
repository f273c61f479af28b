use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use corpus_logging::{corpus_error, corpus_info, corpus_warn};
use wikicorpus_core::{update, CrawlEffect, CrawlMsg, CrawlOutcome, CrawlState, DiscoveredUrls};

use crate::decode::decode_html;
use crate::discover::LinkDiscoverer;
use crate::fetch::Fetcher;
use crate::pace::Pacer;
use crate::persist::{write_url_list, PersistError};

pub const DEFAULT_INDEX_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub start_url: String,
    /// Pause before each follow-up index page request.
    pub page_delay: Duration,
}

impl CrawlSettings {
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            page_delay: DEFAULT_INDEX_DELAY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    pub urls: DiscoveredUrls,
    pub index_pages_visited: usize,
    pub outcome: CrawlOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavedUrls {
    Written { path: PathBuf, count: usize },
    /// Nothing was discovered, so no file was written.
    NothingDiscovered,
}

impl CrawlReport {
    /// Persist the discovered URLs, one per line. An empty set writes nothing
    /// and is reported as `NothingDiscovered` so it cannot be mistaken for a
    /// finished crawl.
    pub fn save(&self, path: &Path) -> Result<SavedUrls, PersistError> {
        if self.urls.is_empty() {
            corpus_warn!(
                "No article URLs discovered after {} index pages; not writing {:?}. \
                 Check that the start URL loads and that the content selector matches the site.",
                self.index_pages_visited,
                path
            );
            return Ok(SavedUrls::NothingDiscovered);
        }
        let written = write_url_list(path, self.urls.iter())?;
        corpus_info!("Saved {} URLs to {:?}", self.urls.len(), written);
        Ok(SavedUrls::Written {
            path: written,
            count: self.urls.len(),
        })
    }
}

/// Follows "next page" links from the start URL, collecting article URLs.
///
/// Requests are strictly sequential. A transport failure halts the crawl but
/// keeps everything discovered up to that point.
pub struct Crawler {
    settings: CrawlSettings,
    fetcher: Arc<dyn Fetcher>,
    discoverer: LinkDiscoverer,
    pacer: Arc<dyn Pacer>,
}

impl Crawler {
    pub fn new(
        settings: CrawlSettings,
        fetcher: Arc<dyn Fetcher>,
        discoverer: LinkDiscoverer,
        pacer: Arc<dyn Pacer>,
    ) -> Self {
        Self {
            settings,
            fetcher,
            discoverer,
            pacer,
        }
    }

    pub async fn run(&self) -> CrawlReport {
        corpus_info!("Starting crawl at: {}", self.settings.start_url);

        let (mut state, effects) = update(
            CrawlState::new(self.settings.start_url.clone()),
            CrawlMsg::Start,
        );
        let mut queue: VecDeque<CrawlEffect> = effects.into();

        while let Some(effect) = queue.pop_front() {
            let msgs = match effect {
                CrawlEffect::FetchIndex { url } => {
                    self.visit(&url, state.visited_index_pages() + 1).await
                }
                CrawlEffect::Pause => {
                    self.pacer.pause(self.settings.page_delay).await;
                    Vec::new()
                }
                CrawlEffect::Finish(outcome) => {
                    log_outcome(&outcome);
                    Vec::new()
                }
            };
            for msg in msgs {
                let (next, effects) = update(state, msg);
                state = next;
                queue.extend(effects);
            }
        }

        let outcome = state.outcome().cloned().unwrap_or(CrawlOutcome::Exhausted);
        let index_pages_visited = state.visited_index_pages();
        let urls = state.into_discovered();
        corpus_info!(
            "Final count: {} unique article URLs from {} index pages",
            urls.len(),
            index_pages_visited
        );

        CrawlReport {
            urls,
            index_pages_visited,
            outcome,
        }
    }

    async fn visit(&self, url: &str, page_number: usize) -> Vec<CrawlMsg> {
        corpus_info!("Scraping index page {}: {}", page_number, url);

        let output = match self.fetcher.fetch(url).await {
            Ok(output) => output,
            Err(err) => {
                return vec![CrawlMsg::FetchFailed {
                    reason: err.to_string(),
                }]
            }
        };

        let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref());
        if decoded.lossy {
            corpus_warn!(
                "Index page {} had invalid {} bytes; decoded lossily",
                url,
                decoded.encoding_label
            );
        }
        let links = self.discoverer.discover(&decoded.html);
        corpus_info!("  -> Found {} candidate links on this page", links.candidates.len());

        vec![
            CrawlMsg::FetchSucceeded,
            CrawlMsg::Discovered {
                candidates: links.candidates.into_iter().collect(),
                next_page: links.next_page,
            },
            CrawlMsg::Advance,
        ]
    }
}

fn log_outcome(outcome: &CrawlOutcome) {
    match outcome {
        CrawlOutcome::Exhausted => {
            corpus_info!("Reached the last index page (no next-page link found)")
        }
        CrawlOutcome::RepeatedIndexPage { url } => {
            corpus_warn!("Next-page link points back to visited page {}; stopping", url)
        }
        CrawlOutcome::Halted { url, reason } => {
            corpus_error!("Crawl halted fetching {}: {}", url, reason)
        }
    }
}
