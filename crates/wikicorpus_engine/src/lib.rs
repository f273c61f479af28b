//! Wikicorpus engine: network, parsing and persistence around the core state machine.
mod corpus;
mod crawl;
mod decode;
mod discover;
mod engine;
mod extract;
mod fetch;
mod filename;
mod harvest;
mod pace;
mod persist;
mod types;

pub use corpus::{load_corpus, CorpusLoad, SkippedFile};
pub use crawl::{CrawlReport, CrawlSettings, Crawler, SavedUrls, DEFAULT_INDEX_DELAY};
pub use decode::{decode_html, DecodedHtml};
pub use discover::{
    DiscoverySettings, LinkDiscoverer, PageLinks, DEFAULT_CONTENT_SELECTOR,
    DEFAULT_RESERVED_MARKERS,
};
pub use engine::{Engine, EngineConfig, EngineError};
pub use extract::{
    ExtractedPage, ExtractionSettings, Extractor, MediaWikiExtractor, DEFAULT_STRIP_SELECTORS,
    DEFAULT_TITLE_SELECTOR,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use filename::{batch_filename, parse_batch_index};
pub use harvest::{
    HarvestError, HarvestReport, HarvestSettings, Harvester, WrittenBatch, DEFAULT_PAGE_DELAY,
};
pub use pace::{NoPause, Pacer, SleepPacer};
pub use persist::{
    batch_json, ensure_output_dir, read_url_list, remove_batch_files, write_url_list,
    AtomicFileWriter, BatchWriter, PersistError,
};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput, SelectorError};
