#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEffect {
    /// Fetch one index page.
    FetchIndex { url: String },
    /// Politeness pause before the next index request.
    Pause,
    /// The crawl reached a terminal state.
    Finish(CrawlOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// No further "next page" link; pagination is exhausted.
    Exhausted,
    /// The next-page link pointed at an index page that was already visited.
    RepeatedIndexPage { url: String },
    /// A transport failure stopped discovery. URLs found so far are kept.
    Halted { url: String, reason: String },
}

impl CrawlOutcome {
    pub fn is_halted(&self) -> bool {
        matches!(self, CrawlOutcome::Halted { .. })
    }
}
