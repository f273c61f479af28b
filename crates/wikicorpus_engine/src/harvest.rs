use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use corpus_logging::{corpus_debug, corpus_info, corpus_warn};
use thiserror::Error;
use wikicorpus_core::{
    Batch, BatchAccumulator, HarvestSchedule, HarvestStep, PageRecord, DEFAULT_BATCH_SIZE,
};

use crate::decode::decode_html;
use crate::extract::Extractor;
use crate::fetch::Fetcher;
use crate::pace::Pacer;
use crate::persist::{ensure_output_dir, remove_batch_files, BatchWriter, PersistError};

pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct HarvestSettings {
    pub batch_size: usize,
    /// Pause after every page fetch attempt.
    pub page_delay: Duration,
    pub output_dir: PathBuf,
}

impl HarvestSettings {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            page_delay: DEFAULT_PAGE_DELAY,
            output_dir,
        }
    }
}

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("output directory unusable: {0}")]
    OutputDir(#[source] PersistError),
    #[error("failed to write batch {index}: {source}")]
    WriteBatch {
        index: usize,
        #[source]
        source: PersistError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenBatch {
    pub index: usize,
    pub path: PathBuf,
    pub records: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestReport {
    pub attempted: usize,
    pub fetch_failures: usize,
    /// Fetched fine but yielded no text; not persisted.
    pub empty_pages: usize,
    pub records_written: usize,
    pub batches: Vec<WrittenBatch>,
}

enum PageOutcome {
    Record(PageRecord),
    Empty,
    FetchFailed,
}

/// Fetches each URL in order, extracts its text and writes fixed-size batches.
///
/// One failing page is logged and skipped; only a batch that cannot be
/// written stops the run.
pub struct Harvester {
    settings: HarvestSettings,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
    pacer: Arc<dyn Pacer>,
    writer: BatchWriter,
}

impl Harvester {
    pub fn new(
        settings: HarvestSettings,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn Extractor>,
        pacer: Arc<dyn Pacer>,
    ) -> Self {
        let writer = BatchWriter::new(settings.output_dir.clone());
        Self {
            settings,
            fetcher,
            extractor,
            pacer,
            writer,
        }
    }

    pub async fn run(&self, urls: &[String]) -> Result<HarvestReport, HarvestError> {
        ensure_output_dir(self.writer.dir()).map_err(HarvestError::OutputDir)?;

        let mut report = HarvestReport::default();
        if urls.is_empty() {
            corpus_warn!("URL list is empty; nothing to harvest. Run the crawl first.");
            return Ok(report);
        }

        // A run owns every batch file in the output directory.
        let stale = remove_batch_files(self.writer.dir()).map_err(HarvestError::OutputDir)?;
        if stale > 0 {
            corpus_warn!(
                "Removed {} batch files left in {:?} by an earlier run",
                stale,
                self.writer.dir()
            );
        }

        corpus_info!("Loaded {} URLs. Starting harvest...", urls.len());
        let mut accumulator = BatchAccumulator::new(self.settings.batch_size);

        for step in HarvestSchedule::new(urls) {
            match step {
                HarvestStep::Fetch {
                    position,
                    total,
                    url,
                } => {
                    report.attempted += 1;
                    corpus_info!("[{}/{}] Scraping: {}", position, total, url);
                    match self.harvest_page(url).await {
                        PageOutcome::Record(record) => {
                            if let Some(batch) = accumulator.push(record) {
                                self.flush(batch, &mut report)?;
                            }
                        }
                        PageOutcome::Empty => report.empty_pages += 1,
                        PageOutcome::FetchFailed => report.fetch_failures += 1,
                    }
                    if step.is_last_fetch() {
                        if let Some(batch) = accumulator.finish() {
                            self.flush(batch, &mut report)?;
                        }
                    }
                }
                HarvestStep::Pause => self.pacer.pause(self.settings.page_delay).await,
            }
        }

        if report.records_written == 0 {
            corpus_warn!(
                "No page yielded any content ({} fetch failures, {} empty pages); \
                 no batch files written. Check the content selector against the site.",
                report.fetch_failures,
                report.empty_pages
            );
        }
        corpus_info!(
            "Harvest complete: {} records in {} batches, {} fetch failures, {} empty pages",
            report.records_written,
            report.batches.len(),
            report.fetch_failures,
            report.empty_pages
        );
        Ok(report)
    }

    async fn harvest_page(&self, url: &str) -> PageOutcome {
        let output = match self.fetcher.fetch(url).await {
            Ok(output) => output,
            Err(err) => {
                corpus_warn!("Failed ({}): {}", err, url);
                return PageOutcome::FetchFailed;
            }
        };

        let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref());
        if decoded.lossy {
            corpus_warn!(
                "Page {} had invalid {} bytes; decoded lossily",
                url,
                decoded.encoding_label
            );
        }

        let page = self.extractor.extract(&decoded.html);
        if page.content.is_empty() {
            corpus_debug!("No content extracted from {}; dropping page", url);
            return PageOutcome::Empty;
        }

        PageOutcome::Record(PageRecord {
            url: url.to_string(),
            title: page.title,
            content: page.content,
        })
    }

    fn flush(&self, batch: Batch, report: &mut HarvestReport) -> Result<(), HarvestError> {
        let index = batch.index;
        let path = self
            .writer
            .write(&batch)
            .map_err(|source| HarvestError::WriteBatch { index, source })?;
        corpus_info!(
            "Saved batch {} to {:?} ({} pages)",
            index,
            path,
            batch.len()
        );
        report.records_written += batch.len();
        report.batches.push(WrittenBatch {
            index,
            path,
            records: batch.len(),
        });
        Ok(())
    }
}
