//! Wikicorpus core: pure crawl state machine, URL dedupe and batch bookkeeping.
mod batch;
mod dedupe;
mod effect;
mod msg;
mod schedule;
mod state;
mod update;

pub use batch::{Batch, BatchAccumulator, PageRecord, DEFAULT_BATCH_SIZE, UNKNOWN_TITLE};
pub use dedupe::{normalize_url, DiscoveredUrls};
pub use effect::{CrawlEffect, CrawlOutcome};
pub use msg::CrawlMsg;
pub use schedule::{HarvestSchedule, HarvestStep};
pub use state::{CrawlPhase, CrawlState};
pub use update::update;
