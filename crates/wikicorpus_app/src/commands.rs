use std::process::ExitCode;

use anyhow::{Context, Result};
use corpus_logging::{corpus_error, corpus_info, corpus_warn};
use wikicorpus_engine::{load_corpus, read_url_list, Engine, PersistError, SavedUrls};

use crate::config::AppConfig;

/// How a command ended when no error stopped it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    /// The crawl found no article URLs, so no URL file was written.
    NothingDiscovered,
    /// The file or directory the command reads from does not exist.
    MissingInput,
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Completed => ExitCode::SUCCESS,
            RunStatus::NothingDiscovered | RunStatus::MissingInput => ExitCode::FAILURE,
        }
    }
}

pub async fn crawl(config: &AppConfig) -> Result<RunStatus> {
    let engine = Engine::new(config.engine_config()?)?;
    let report = engine.crawler()?.run().await;

    let saved = report
        .save(&config.urls_file)
        .with_context(|| format!("failed to write {}", config.urls_file.display()))?;

    match saved {
        SavedUrls::Written { .. } => {
            if report.outcome.is_halted() {
                corpus_warn!(
                    "Crawl stopped early; {:?} holds a partial URL list",
                    config.urls_file
                );
            }
            Ok(RunStatus::Completed)
        }
        SavedUrls::NothingDiscovered => Ok(RunStatus::NothingDiscovered),
    }
}

pub async fn harvest(config: &AppConfig) -> Result<RunStatus> {
    let urls = match read_url_list(&config.urls_file) {
        Ok(urls) => urls,
        Err(PersistError::NotFound(path)) => {
            corpus_error!("{:?} not found. Run the crawl first.", path);
            return Ok(RunStatus::MissingInput);
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read {}", config.urls_file.display()))
        }
    };

    let engine = Engine::new(config.engine_config()?)?;
    let report = engine.harvester()?.run(&urls).await?;
    corpus_info!(
        "Wrote {} records to {:?}",
        report.records_written,
        config.output_dir
    );
    Ok(RunStatus::Completed)
}

pub async fn run(config: &AppConfig) -> Result<RunStatus> {
    match crawl(config).await? {
        RunStatus::Completed => harvest(config).await,
        stopped => Ok(stopped),
    }
}

pub fn stats(config: &AppConfig) -> Result<RunStatus> {
    let load = match load_corpus(&config.output_dir) {
        Ok(load) => load,
        Err(PersistError::NotFound(path)) => {
            corpus_error!("{:?} does not exist. Run the harvest first.", path);
            return Ok(RunStatus::MissingInput);
        }
        Err(err) => return Err(err.into()),
    };

    if load.found_nothing() {
        corpus_warn!("No batch files in {:?}", config.output_dir);
    }
    println!("batch files: {}", load.batch_files.len());
    println!("records:     {}", load.records.len());
    println!(
        "characters:  {}",
        load.records
            .iter()
            .map(|record| record.content.chars().count())
            .sum::<usize>()
    );
    for skipped in &load.skipped {
        println!("skipped:     {} ({})", skipped.path.display(), skipped.reason);
    }
    Ok(RunStatus::Completed)
}
