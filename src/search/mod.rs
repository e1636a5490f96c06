use crate::api::{ApiError, ApiErrorKind};
use leptos::logging::warn;
use std::time::Duration;

pub(crate) const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
pub(crate) const MAX_RESULTS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SearchPhase {
    Idle,
    Debouncing { generation: u64 },
    Fetching { generation: u64 },
    Success,
    Cancelled,
    Failed,
}

/// Side effect the caller must perform after [`SearchMachine::input`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SearchCommand {
    /// Cancel any pending timer and in-flight request.
    CancelAll,
    /// Cancel the previous timer/request, then start a new timer.
    Schedule { generation: u64, delay: Duration },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SearchRequest {
    pub generation: u64,
    pub query: String,
}

/// Debounced type-ahead search. Every keystroke opens a new generation; only responses
/// for the newest generation are ever shown.
#[derive(Clone, Debug)]
pub(crate) struct SearchMachine<R> {
    generation: u64,
    phase: SearchPhase,
    query: String,
    results: Vec<R>,
}

impl<R> Default for SearchMachine<R> {
    fn default() -> Self {
        Self {
            generation: 0,
            phase: SearchPhase::Idle,
            query: String::new(),
            results: vec![],
        }
    }
}

impl<R: Clone> SearchMachine<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn results(&self) -> &[R] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.phase,
            SearchPhase::Debouncing { .. } | SearchPhase::Fetching { .. }
        )
    }

    /// Whether the dropdown should be open.
    pub fn shows_results(&self) -> bool {
        self.phase == SearchPhase::Success
    }

    pub fn input(&mut self, query: &str) -> SearchCommand {
        // A new generation on every keystroke invalidates whatever is pending.
        self.generation = self.generation.saturating_add(1);
        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.query.clear();
            self.results.clear();
            self.phase = SearchPhase::Idle;
            return SearchCommand::CancelAll;
        }
        self.query = trimmed.to_string();
        self.phase = SearchPhase::Debouncing {
            generation: self.generation,
        };
        SearchCommand::Schedule {
            generation: self.generation,
            delay: SEARCH_DEBOUNCE,
        }
    }

    pub fn debounce_elapsed(&mut self, generation: u64) -> Option<SearchRequest> {
        if self.phase != (SearchPhase::Debouncing { generation }) {
            return None;
        }
        self.phase = SearchPhase::Fetching { generation };
        Some(SearchRequest {
            generation,
            query: self.query.clone(),
        })
    }

    /// Feed a response back. Returns `false` when it belonged to a superseded generation.
    pub fn resolve(&mut self, generation: u64, outcome: Result<Vec<R>, ApiError>) -> bool {
        if self.phase != (SearchPhase::Fetching { generation }) {
            return false;
        }
        match outcome {
            Ok(mut hits) => {
                hits.truncate(MAX_RESULTS);
                self.results = hits;
                self.phase = SearchPhase::Success;
            }
            Err(e) if e.kind == ApiErrorKind::Aborted => {
                self.results.clear();
                self.phase = SearchPhase::Cancelled;
            }
            Err(e) => {
                warn!("search for {:?} failed: {}", self.query, e);
                self.results.clear();
                self.phase = SearchPhase::Failed;
            }
        }
        true
    }

    /// Close the dropdown (selection made, click outside). In-flight responses are ignored.
    pub fn clear(&mut self) {
        self.generation = self.generation.saturating_add(1);
        self.results.clear();
        self.query.clear();
        self.phase = SearchPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(machine: &mut SearchMachine<String>, q: &str) -> u64 {
        match machine.input(q) {
            SearchCommand::Schedule { generation, delay } => {
                assert_eq!(delay, SEARCH_DEBOUNCE);
                generation
            }
            other => panic!("expected schedule, got {other:?}"),
        }
    }

    fn hits(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_blank_input_cancels() {
        let mut m = SearchMachine::<String>::new();
        assert_eq!(m.input("   "), SearchCommand::CancelAll);
        assert_eq!(m.phase(), SearchPhase::Idle);
    }

    #[test]
    fn test_happy_path_truncates_results() {
        let mut m = SearchMachine::new();
        let g = schedule(&mut m, " not ");
        assert!(m.is_loading());
        let req = m.debounce_elapsed(g).expect("current generation fires");
        assert_eq!(req.query, "not");
        assert!(m.resolve(g, Ok(hits(&["a", "b", "c", "d", "e", "f", "g"]))));
        assert!(m.shows_results());
        assert_eq!(m.results().len(), MAX_RESULTS);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut m = SearchMachine::new();
        let foo = schedule(&mut m, "foo");
        m.debounce_elapsed(foo).expect("foo fires");
        let bar = schedule(&mut m, "bar");
        let req = m.debounce_elapsed(bar).expect("bar fires");
        assert_eq!(req.query, "bar");

        assert!(m.resolve(bar, Ok(hits(&["bar-1"]))));
        assert!(!m.resolve(foo, Ok(hits(&["foo-1"]))));
        assert_eq!(m.results(), hits(&["bar-1"]).as_slice());
        assert_eq!(m.phase(), SearchPhase::Success);
    }

    #[test]
    fn test_stale_response_before_current_does_not_finish_it() {
        let mut m = SearchMachine::new();
        let foo = schedule(&mut m, "foo");
        m.debounce_elapsed(foo);
        let bar = schedule(&mut m, "bar");
        m.debounce_elapsed(bar);
        assert!(!m.resolve(foo, Ok(hits(&["foo-1"]))));
        assert_eq!(m.phase(), SearchPhase::Fetching { generation: bar });
        assert!(m.results().is_empty());
    }

    #[test]
    fn test_superseded_timer_does_not_fire() {
        let mut m = SearchMachine::<String>::new();
        let first = schedule(&mut m, "no");
        let second = schedule(&mut m, "notion");
        assert!(m.debounce_elapsed(first).is_none());
        assert!(m.debounce_elapsed(second).is_some());
    }

    #[test]
    fn test_failure_clears_results() {
        let mut m = SearchMachine::<String>::new();
        let g = schedule(&mut m, "x");
        m.debounce_elapsed(g);
        assert!(m.resolve(g, Err(ApiError::network("offline"))));
        assert_eq!(m.phase(), SearchPhase::Failed);
        assert!(!m.shows_results());
    }

    #[test]
    fn test_aborted_is_cancelled() {
        let mut m = SearchMachine::<String>::new();
        let g = schedule(&mut m, "x");
        m.debounce_elapsed(g);
        assert!(m.resolve(g, Err(ApiError::aborted())));
        assert_eq!(m.phase(), SearchPhase::Cancelled);
    }

    #[test]
    fn test_clear_drops_in_flight() {
        let mut m = SearchMachine::new();
        let g = schedule(&mut m, "x");
        m.debounce_elapsed(g);
        m.clear();
        assert!(!m.resolve(g, Ok(hits(&["late"]))));
        assert_eq!(m.phase(), SearchPhase::Idle);
        assert!(m.results().is_empty());
    }
}
