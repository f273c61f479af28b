/// One step of a sequential harvest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestStep<'a> {
    /// Fetch the URL at 1-based `position` out of `total`.
    Fetch {
        position: usize,
        total: usize,
        url: &'a str,
    },
    /// Politeness pause; follows every fetch attempt.
    Pause,
}

impl HarvestStep<'_> {
    /// True for the fetch of the final URL in the list.
    pub fn is_last_fetch(&self) -> bool {
        matches!(self, HarvestStep::Fetch { position, total, .. } if position == total)
    }
}

/// Iterator yielding fetch/pause steps over a URL list in input order.
#[derive(Debug, Clone)]
pub struct HarvestSchedule<'a> {
    urls: &'a [String],
    cursor: usize,
    pause_pending: bool,
}

impl<'a> HarvestSchedule<'a> {
    pub fn new(urls: &'a [String]) -> Self {
        Self {
            urls,
            cursor: 0,
            pause_pending: false,
        }
    }

    pub fn total(&self) -> usize {
        self.urls.len()
    }
}

impl<'a> Iterator for HarvestSchedule<'a> {
    type Item = HarvestStep<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pause_pending {
            self.pause_pending = false;
            return Some(HarvestStep::Pause);
        }
        let url = self.urls.get(self.cursor)?;
        self.cursor += 1;
        self.pause_pending = true;
        Some(HarvestStep::Fetch {
            position: self.cursor,
            total: self.urls.len(),
            url,
        })
    }
}
