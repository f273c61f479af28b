use std::sync::Once;

use pretty_assertions::assert_eq;
use wikicorpus_core::{update, CrawlEffect, CrawlMsg, CrawlOutcome, CrawlPhase, CrawlState};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(corpus_logging::initialize_for_tests);
}

fn discovered(candidates: &[&str], next_page: Option<&str>) -> CrawlMsg {
    CrawlMsg::Discovered {
        candidates: candidates.iter().map(|c| c.to_string()).collect(),
        next_page: next_page.map(str::to_string),
    }
}

/// Runs one successfully fetched page through the machine.
fn visit_page(
    state: CrawlState,
    candidates: &[&str],
    next_page: Option<&str>,
) -> (CrawlState, Vec<CrawlEffect>) {
    let (state, effects) = update(state, CrawlMsg::FetchSucceeded);
    assert!(effects.is_empty());
    assert_eq!(state.phase(), CrawlPhase::Extracting);
    let (state, effects) = update(state, discovered(candidates, next_page));
    assert!(effects.is_empty());
    assert_eq!(state.phase(), CrawlPhase::Advancing);
    update(state, CrawlMsg::Advance)
}

#[test]
fn start_fetches_the_start_url() {
    init_logging();
    let state = CrawlState::new("https://wiki.example.org/w/Special:AllPages");
    assert_eq!(state.phase(), CrawlPhase::Fetching);

    let (state, effects) = update(state, CrawlMsg::Start);
    assert_eq!(
        effects,
        vec![CrawlEffect::FetchIndex {
            url: "https://wiki.example.org/w/Special:AllPages".to_string()
        }]
    );
    assert_eq!(
        state.current_index_url(),
        Some("https://wiki.example.org/w/Special:AllPages")
    );
    assert_eq!(state.visited_index_pages(), 0);

    // A second Start is ignored.
    let (_state, effects) = update(state, CrawlMsg::Start);
    assert!(effects.is_empty());
}

#[test]
fn next_page_loops_back_to_fetching_with_a_pause() {
    init_logging();
    let (state, _) = update(CrawlState::new("https://w.example.org/index"), CrawlMsg::Start);
    let (state, effects) = visit_page(
        state,
        &["https://w.example.org/A", "https://w.example.org/B"],
        Some("https://w.example.org/index?from=C"),
    );

    assert_eq!(state.phase(), CrawlPhase::Fetching);
    assert_eq!(state.visited_index_pages(), 1);
    assert_eq!(
        effects,
        vec![
            CrawlEffect::Pause,
            CrawlEffect::FetchIndex {
                url: "https://w.example.org/index?from=C".to_string()
            }
        ]
    );
}

#[test]
fn missing_next_page_finishes_as_exhausted() {
    init_logging();
    let (state, _) = update(CrawlState::new("https://w.example.org/index"), CrawlMsg::Start);
    let (state, effects) = visit_page(state, &["https://w.example.org/A"], None);

    assert_eq!(state.phase(), CrawlPhase::Done);
    assert_eq!(effects, vec![CrawlEffect::Finish(CrawlOutcome::Exhausted)]);
    assert_eq!(state.outcome(), Some(&CrawlOutcome::Exhausted));
    assert_eq!(state.next_index_url(), None);
    assert_eq!(state.discovered().len(), 1);
}

#[test]
fn fetch_failure_halts_and_keeps_partial_results() {
    init_logging();
    let (state, _) = update(CrawlState::new("https://w.example.org/index"), CrawlMsg::Start);
    let (state, _) = visit_page(
        state,
        &["https://w.example.org/A", "https://w.example.org/B"],
        Some("https://w.example.org/index?from=C"),
    );

    let (state, effects) = update(
        state,
        CrawlMsg::FetchFailed {
            reason: "http status 503".to_string(),
        },
    );

    let expected = CrawlOutcome::Halted {
        url: "https://w.example.org/index?from=C".to_string(),
        reason: "http status 503".to_string(),
    };
    assert_eq!(state.phase(), CrawlPhase::Failed);
    assert_eq!(effects, vec![CrawlEffect::Finish(expected.clone())]);
    assert_eq!(state.outcome(), Some(&expected));
    assert_eq!(state.discovered().len(), 2);
    assert_eq!(state.visited_index_pages(), 1);
}

#[test]
fn terminal_state_ignores_further_messages() {
    init_logging();
    let (state, _) = update(CrawlState::new("https://w.example.org/index"), CrawlMsg::Start);
    let (state, _) = visit_page(state, &[], None);
    assert!(state.is_terminal());

    let before = state.clone();
    let (state, effects) = update(state, discovered(&["https://w.example.org/Z"], None));
    assert!(effects.is_empty());
    assert_eq!(state, before);

    let (state, effects) = update(state, CrawlMsg::Start);
    assert!(effects.is_empty());
    assert_eq!(state.phase(), CrawlPhase::Done);
}

#[test]
fn out_of_phase_messages_are_ignored() {
    init_logging();
    let state = CrawlState::new("https://w.example.org/index");

    // Nothing is in flight yet.
    let (state, effects) = update(state, CrawlMsg::FetchSucceeded);
    assert!(effects.is_empty());
    assert_eq!(state.visited_index_pages(), 0);

    let (state, effects) = update(state, CrawlMsg::Advance);
    assert!(effects.is_empty());
    assert_eq!(state.phase(), CrawlPhase::Fetching);

    let (state, _) = update(state, CrawlMsg::Start);
    let (state, effects) = update(state, discovered(&["https://w.example.org/A"], None));
    assert!(effects.is_empty());
    assert!(state.discovered().is_empty());
}

#[test]
fn repeated_index_page_stops_the_loop() {
    init_logging();
    let (state, _) = update(CrawlState::new("https://w.example.org/index"), CrawlMsg::Start);
    let (state, _) = visit_page(state, &[], Some("https://w.example.org/page2"));
    let (state, effects) = visit_page(state, &[], Some("https://w.example.org/index#top"));

    assert_eq!(state.phase(), CrawlPhase::Done);
    assert_eq!(
        effects,
        vec![CrawlEffect::Finish(CrawlOutcome::RepeatedIndexPage {
            url: "https://w.example.org/index#top".to_string()
        })]
    );
    assert_eq!(state.visited_index_pages(), 2);
}

#[test]
fn same_link_across_pages_is_kept_once() {
    init_logging();
    let (state, _) = update(CrawlState::new("https://w.example.org/index"), CrawlMsg::Start);
    let (state, _) = visit_page(
        state,
        &["https://w.example.org/A", "https://w.example.org/A"],
        Some("https://w.example.org/page2"),
    );
    let (state, _) = visit_page(
        state,
        &["https://w.example.org/A#Section", "https://w.example.org/B"],
        Some("https://w.example.org/page3"),
    );
    let (state, _) = visit_page(state, &["https://W.EXAMPLE.ORG/A"], None);

    assert_eq!(
        state.into_discovered().into_vec(),
        vec![
            "https://w.example.org/A".to_string(),
            "https://w.example.org/B".to_string()
        ]
    );
}
