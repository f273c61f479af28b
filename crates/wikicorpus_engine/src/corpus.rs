//! Reader side of the batch file contract.
//!
//! Loads every `batch_<n>.json` in a directory the way the downstream
//! ingestion does: files are read in batch order and a file that cannot be
//! read or parsed is reported and skipped instead of aborting the load.

use std::fs;
use std::path::{Path, PathBuf};

use corpus_logging::{corpus_info, corpus_warn};
use wikicorpus_core::PageRecord;

use crate::filename::parse_batch_index;
use crate::persist::PersistError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusLoad {
    pub records: Vec<PageRecord>,
    /// Batch files that parsed, in the order they were read.
    pub batch_files: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
}

impl CorpusLoad {
    /// No batch file was found at all, readable or not.
    pub fn found_nothing(&self) -> bool {
        self.batch_files.is_empty() && self.skipped.is_empty()
    }
}

/// Load all batch files under `dir`.
///
/// A missing directory is an error (`PersistError::NotFound`); an existing
/// directory with no batch files is an empty load.
pub fn load_corpus(dir: &Path) -> Result<CorpusLoad, PersistError> {
    if !dir.is_dir() {
        return Err(PersistError::NotFound(dir.to_path_buf()));
    }

    let mut batches: Vec<(usize, PathBuf)> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .filter_map(|entry| {
            let index = parse_batch_index(entry.file_name().to_str()?)?;
            Some((index, entry.path()))
        })
        .collect();
    batches.sort_by_key(|(index, _)| *index);

    let mut load = CorpusLoad::default();
    for (_, path) in batches {
        match read_batch(&path) {
            Ok(records) => {
                load.records.extend(records);
                load.batch_files.push(path);
            }
            Err(reason) => {
                corpus_warn!("Could not read batch file {:?}: {}", path, reason);
                load.skipped.push(SkippedFile { path, reason });
            }
        }
    }

    corpus_info!(
        "Loaded {} records from {} batch files ({} skipped)",
        load.records.len(),
        load.batch_files.len(),
        load.skipped.len()
    );
    Ok(load)
}

fn read_batch(path: &Path) -> Result<Vec<PageRecord>, String> {
    let content = fs::read_to_string(path).map_err(|err| err.to_string())?;
    serde_json::from_str(&content).map_err(|err| err.to_string())
}
