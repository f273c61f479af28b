use crate::{CrawlEffect, CrawlMsg, CrawlOutcome, CrawlPhase, CrawlState};

/// Pure update function: applies a message to crawl state and returns any effects.
///
/// Messages that do not fit the current phase are ignored, and a terminal
/// state never leaves `Done`/`Failed`.
pub fn update(mut state: CrawlState, msg: CrawlMsg) -> (CrawlState, Vec<CrawlEffect>) {
    if state.is_terminal() {
        return (state, Vec::new());
    }

    let effects = match (state.phase(), msg) {
        (CrawlPhase::Fetching, CrawlMsg::Start) => {
            if state.has_started() {
                return (state, Vec::new());
            }
            match state.begin_fetch() {
                Some(url) => vec![CrawlEffect::FetchIndex { url }],
                None => vec![CrawlEffect::Finish(state.finish(CrawlOutcome::Exhausted))],
            }
        }
        (CrawlPhase::Fetching, CrawlMsg::FetchSucceeded) if state.has_started() => {
            state.record_page_fetched();
            Vec::new()
        }
        (CrawlPhase::Fetching, CrawlMsg::FetchFailed { reason }) if state.has_started() => {
            let url = state.current_index_url().unwrap_or_default().to_string();
            let outcome = state.finish(CrawlOutcome::Halted { url, reason });
            vec![CrawlEffect::Finish(outcome)]
        }
        (
            CrawlPhase::Extracting,
            CrawlMsg::Discovered {
                candidates,
                next_page,
            },
        ) => {
            state.record_discovery(candidates, next_page);
            Vec::new()
        }
        (CrawlPhase::Advancing, CrawlMsg::Advance) => advance(&mut state),
        _ => Vec::new(),
    };

    (state, effects)
}

fn advance(state: &mut CrawlState) -> Vec<CrawlEffect> {
    let Some(next) = state.next_index_url().map(str::to_string) else {
        return vec![CrawlEffect::Finish(state.finish(CrawlOutcome::Exhausted))];
    };

    if state.was_visited(&next) {
        let outcome = state.finish(CrawlOutcome::RepeatedIndexPage { url: next });
        return vec![CrawlEffect::Finish(outcome)];
    }

    match state.begin_fetch() {
        Some(url) => vec![CrawlEffect::Pause, CrawlEffect::FetchIndex { url }],
        None => vec![CrawlEffect::Finish(state.finish(CrawlOutcome::Exhausted))],
    }
}
