/// Inputs to the crawl state machine, produced by whoever performs the IO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlMsg {
    /// Begin the crawl at the configured start URL.
    Start,
    /// The in-flight index page came back with HTTP 200.
    FetchSucceeded,
    /// The in-flight index page could not be fetched (transport error or non-200).
    FetchFailed { reason: String },
    /// Links discovered on the page that was just fetched.
    Discovered {
        candidates: Vec<String>,
        next_page: Option<String>,
    },
    /// Move past the current page: follow the next-page link or finish.
    Advance,
}
