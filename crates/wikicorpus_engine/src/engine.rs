use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use url::Url;

use crate::crawl::{CrawlSettings, Crawler};
use crate::discover::{DiscoverySettings, LinkDiscoverer};
use crate::extract::{ExtractionSettings, MediaWikiExtractor};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::harvest::{HarvestSettings, Harvester};
use crate::pace::{Pacer, SleepPacer};
use crate::types::{FetchError, SelectorError};

/// Everything the crawl and harvest controllers need, passed in explicitly.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub fetch: FetchSettings,
    pub discovery: DiscoverySettings,
    pub extraction: ExtractionSettings,
    pub crawl: CrawlSettings,
    pub harvest: HarvestSettings,
}

impl EngineConfig {
    /// Defaults for a MediaWiki site: crawl from `start_url`, resolve links
    /// against `base_url`, write batches to `output_dir`.
    pub fn for_site(base_url: Url, start_url: impl Into<String>, output_dir: PathBuf) -> Self {
        Self {
            fetch: FetchSettings::default(),
            discovery: DiscoverySettings::for_site(base_url),
            extraction: ExtractionSettings::default(),
            crawl: CrawlSettings::new(start_url),
            harvest: HarvestSettings::new(output_dir),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("http client: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Selector(#[from] SelectorError),
}

/// Builds controllers that share one fetcher and one pacer.
pub struct Engine {
    config: EngineConfig,
    fetcher: Arc<dyn Fetcher>,
    pacer: Arc<dyn Pacer>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone())?);
        Ok(Self::with_parts(config, fetcher, Arc::new(SleepPacer)))
    }

    /// Use the given fetcher and pacer instead of the network and the tokio timer.
    pub fn with_parts(config: EngineConfig, fetcher: Arc<dyn Fetcher>, pacer: Arc<dyn Pacer>) -> Self {
        Self {
            config,
            fetcher,
            pacer,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn crawler(&self) -> Result<Crawler, EngineError> {
        let discoverer = LinkDiscoverer::new(self.config.discovery.clone())?;
        Ok(Crawler::new(
            self.config.crawl.clone(),
            self.fetcher.clone(),
            discoverer,
            self.pacer.clone(),
        ))
    }

    pub fn harvester(&self) -> Result<Harvester, EngineError> {
        let extractor = MediaWikiExtractor::new(self.config.extraction.clone())?;
        Ok(Harvester::new(
            self.config.harvest.clone(),
            self.fetcher.clone(),
            Arc::new(extractor),
            self.pacer.clone(),
        ))
    }
}
