use serde::{Deserialize, Serialize};

/// Records per batch file unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 150;

/// Title used when a page has no primary heading.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// One harvested article. Field order matches the batch file layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub content: String,
}

/// A flushed group of records with its 1-based sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub index: usize,
    pub records: Vec<PageRecord>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// In-memory buffer that cuts records into fixed-size, sequentially numbered batches.
///
/// Numbers are handed out when a batch is cut, so they stay gapless no matter
/// how many pages were skipped in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchAccumulator {
    batch_size: usize,
    pending: Vec<PageRecord>,
    next_index: usize,
}

impl BatchAccumulator {
    /// A `batch_size` of zero is treated as one.
    pub fn new(batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            batch_size,
            pending: Vec::with_capacity(batch_size),
            next_index: 1,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number the next cut batch will carry.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Add a record; returns a full batch once the size bound is reached.
    pub fn push(&mut self, record: PageRecord) -> Option<Batch> {
        self.pending.push(record);
        if self.pending.len() >= self.batch_size {
            Some(self.cut())
        } else {
            None
        }
    }

    /// Flush whatever remains. Returns `None` when nothing is pending.
    pub fn finish(&mut self) -> Option<Batch> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.cut())
        }
    }

    fn cut(&mut self) -> Batch {
        let records = std::mem::replace(&mut self.pending, Vec::with_capacity(self.batch_size));
        let index = self.next_index;
        self.next_index += 1;
        Batch { index, records }
    }
}

impl Default for BatchAccumulator {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}
