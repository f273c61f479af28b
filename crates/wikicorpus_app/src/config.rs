//! Optional RON config file plus command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use corpus_logging::corpus_info;
use serde::{Deserialize, Serialize};
use url::Url;
use wikicorpus_core::DEFAULT_BATCH_SIZE;
use wikicorpus_engine::{EngineConfig, DEFAULT_USER_AGENT};

use crate::cli::{CrawlArgs, HarvestArgs, RunArgs, StatsArgs};

pub const DEFAULT_START_URL: &str = "https://wiki.metakgp.org/w/Special:AllPages/";
pub const DEFAULT_BASE_URL: &str = "https://wiki.metakgp.org";
pub const DEFAULT_URLS_FILE: &str = "urls.txt";
pub const DEFAULT_OUTPUT_DIR: &str = "scraped_data";

/// Settings the binary accepts from a config file. Every field may be omitted.
///
/// ```ron
/// (
///     start_url: "https://wiki.example.org/w/Special:AllPages",
///     base_url: "https://wiki.example.org",
///     batch_size: 100,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub start_url: String,
    pub base_url: String,
    pub urls_file: PathBuf,
    pub output_dir: PathBuf,
    pub batch_size: usize,
    pub crawl_delay_ms: u64,
    pub harvest_delay_ms: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub content_selector: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            urls_file: PathBuf::from(DEFAULT_URLS_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            batch_size: DEFAULT_BATCH_SIZE,
            crawl_delay_ms: 500,
            harvest_delay_ms: 200,
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            content_selector: None,
        }
    }
}

/// Values given on the command line; each one replaces the config file value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub start_url: Option<String>,
    pub urls_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub batch_size: Option<usize>,
}

impl From<&CrawlArgs> for Overrides {
    fn from(args: &CrawlArgs) -> Self {
        Self {
            start_url: args.start_url.clone(),
            urls_file: args.urls_file.clone(),
            ..Self::default()
        }
    }
}

impl From<&HarvestArgs> for Overrides {
    fn from(args: &HarvestArgs) -> Self {
        Self {
            urls_file: args.urls_file.clone(),
            output_dir: args.output_dir.clone(),
            batch_size: args.batch_size,
            ..Self::default()
        }
    }
}

impl From<&RunArgs> for Overrides {
    fn from(args: &RunArgs) -> Self {
        Self {
            start_url: args.start_url.clone(),
            urls_file: args.urls_file.clone(),
            output_dir: args.output_dir.clone(),
            batch_size: args.batch_size,
        }
    }
}

impl From<&StatsArgs> for Overrides {
    fn from(args: &StatsArgs) -> Self {
        Self {
            output_dir: args.output_dir.clone(),
            ..Self::default()
        }
    }
}

impl AppConfig {
    /// Read the config file at `path`, or use the defaults when none is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        corpus_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(start_url) = overrides.start_url {
            self.start_url = start_url;
        }
        if let Some(urls_file) = overrides.urls_file {
            self.urls_file = urls_file;
        }
        if let Some(output_dir) = overrides.output_dir {
            self.output_dir = output_dir;
        }
        if let Some(batch_size) = overrides.batch_size {
            self.batch_size = batch_size;
        }
        self
    }

    pub fn engine_config(&self) -> Result<EngineConfig> {
        let base_url = Url::parse(&self.base_url)
            .with_context(|| format!("invalid base_url {:?}", self.base_url))?;
        Url::parse(&self.start_url)
            .with_context(|| format!("invalid start_url {:?}", self.start_url))?;

        let mut config =
            EngineConfig::for_site(base_url, self.start_url.clone(), self.output_dir.clone());
        config.fetch.user_agent = self.user_agent.clone();
        config.fetch.connect_timeout = Duration::from_secs(self.timeout_secs);
        config.fetch.request_timeout = Duration::from_secs(self.timeout_secs);
        config.crawl.page_delay = Duration::from_millis(self.crawl_delay_ms);
        config.harvest.batch_size = self.batch_size;
        config.harvest.page_delay = Duration::from_millis(self.harvest_delay_ms);
        if let Some(selector) = &self.content_selector {
            config.discovery.content_selector = selector.clone();
            config.extraction.content_selector = selector.clone();
        }
        Ok(config)
    }
}
