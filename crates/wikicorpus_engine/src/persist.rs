use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use corpus_logging::corpus_debug;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;
use thiserror::Error;
use wikicorpus_core::{normalize_url, Batch, PageRecord};

use crate::filename::{batch_filename, parse_batch_index};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
///
/// A failed write leaves any previous file at the target untouched.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// Serialize records as the batch file document: a JSON array, four-space indent.
pub fn batch_json(records: &[PageRecord]) -> Result<String, PersistError> {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut serializer)?;
    // serde_json only ever emits valid UTF-8.
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Writes each batch to `batch_{index}.json` in the output directory.
#[derive(Debug, Clone)]
pub struct BatchWriter {
    writer: AtomicFileWriter,
}

impl BatchWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir),
        }
    }

    pub fn dir(&self) -> &Path {
        self.writer.dir()
    }

    pub fn write(&self, batch: &Batch) -> Result<PathBuf, PersistError> {
        let json = batch_json(&batch.records)?;
        self.writer.write(&batch_filename(batch.index), &json)
    }
}

/// Delete every `batch_<n>.json` in `dir`, leaving other files alone.
/// Returns how many were removed.
pub fn remove_batch_files(dir: &Path) -> Result<usize, PersistError> {
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let is_batch = entry
            .file_name()
            .to_str()
            .and_then(parse_batch_index)
            .is_some();
        if is_batch {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Write one URL per line, atomically. Order is whatever the iterator yields.
pub fn write_url_list<'a, I>(path: &Path, urls: I) -> Result<PathBuf, PersistError>
where
    I: IntoIterator<Item = &'a str>,
{
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| PersistError::OutputDir(format!("{} is not a file path", path.display())))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut content = String::new();
    for url in urls {
        content.push_str(url);
        content.push('\n');
    }
    AtomicFileWriter::new(dir).write(filename, &content)
}

/// Read a URL list file: trimmed, blank lines skipped, duplicates dropped
/// keeping the first occurrence so input order is preserved.
pub fn read_url_list(path: &Path) -> Result<Vec<String>, PersistError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(PersistError::NotFound(path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };

    let mut seen = HashSet::new();
    let mut urls = Vec::new();
    let mut duplicates = 0usize;
    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let key = normalize_url(line).unwrap_or_else(|| line.to_string());
        if seen.insert(key) {
            urls.push(line.to_string());
        } else {
            duplicates += 1;
        }
    }
    if duplicates > 0 {
        corpus_debug!(
            "Dropped {} duplicate URLs while reading {:?}",
            duplicates,
            path
        );
    }
    Ok(urls)
}
