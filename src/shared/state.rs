//! Search view state
//!
//! Pure state machine behind the search page: `Idle` → `Searching` →
//! `Results` | `Error`, with selection layered on top of `Results`.
//! Each search gets a generation ticket; responses for an older ticket
//! are dropped so a slow request never overwrites a newer one.

use crate::domain::models::{AnswerResult, SearchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    Results,
    Error,
}

/// Handle for one in-flight search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    query: String,
}

impl SearchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Trimmed query to send
    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    phase: SearchPhase,
    query: String,
    answer: Option<String>,
    results: Vec<SearchResult>,
    selected_key: Option<String>,
    error: Option<String>,
    generation: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Searching
    }

    /// False only on the landing view
    pub fn has_searched(&self) -> bool {
        self.phase != SearchPhase::Idle
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Successful search that matched nothing
    pub fn shows_no_matches(&self) -> bool {
        self.phase == SearchPhase::Results && self.results.is_empty()
    }

    /// Start a search. Blank queries are ignored and return `None`.
    pub fn begin_search(&mut self, raw_query: &str) -> Option<SearchTicket> {
        let query = raw_query.trim();
        if query.is_empty() {
            return None;
        }

        self.generation += 1;
        self.phase = SearchPhase::Searching;
        self.query = query.to_string();
        self.answer = None;
        self.error = None;
        self.selected_key = None;

        Some(SearchTicket {
            generation: self.generation,
            query: self.query.clone(),
        })
    }

    /// Apply a backend answer. Returns false if the ticket is stale.
    pub fn complete(&mut self, ticket: &SearchTicket, result: AnswerResult) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        self.results = SearchResult::from_contexts(&result.contexts);
        self.answer = result.answer.filter(|a| !a.trim().is_empty());
        self.selected_key = self.results.first().map(|r| r.key.clone());
        self.error = None;
        self.phase = SearchPhase::Results;
        true
    }

    /// Record a failed search, clearing earlier results. Returns false if the ticket is stale.
    pub fn fail(&mut self, ticket: &SearchTicket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        self.results.clear();
        self.answer = None;
        self.selected_key = None;
        self.error = Some(message.into());
        self.phase = SearchPhase::Error;
        true
    }

    /// Select a result by key. Unknown keys leave the selection unchanged.
    pub fn select(&mut self, key: &str) -> bool {
        if self.results.iter().any(|r| r.key == key) {
            self.selected_key = Some(key.to_string());
            true
        } else {
            false
        }
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.selected_key.as_deref()
    }

    pub fn selected(&self) -> Option<&SearchResult> {
        let key = self.selected_key.as_deref()?;
        self.results.iter().find(|r| r.key == key)
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selected_key.as_deref() == Some(key)
    }

    /// Back to the landing view; any in-flight response is dropped.
    pub fn reset(&mut self) {
        *self = Self {
            generation: self.generation,
            ..Self::default()
        };
    }

    fn is_current(&self, ticket: &SearchTicket) -> bool {
        self.phase == SearchPhase::Searching && ticket.generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ContextItem, ContextMetadata};

    fn answer(text: &str, files: &[&str]) -> AnswerResult {
        AnswerResult {
            answer: Some(text.to_string()),
            contexts: files
                .iter()
                .map(|f| ContextItem {
                    file_name: Some(f.to_string()),
                    text: format!("{} body", f),
                    metadata: Some(ContextMetadata {
                        category: Some("契約書".to_string()),
                        ..Default::default()
                    }),
                })
                .collect(),
        }
    }

    #[test]
    fn test_starts_idle() {
        let state = SearchState::new();
        assert_eq!(state.phase(), SearchPhase::Idle);
        assert!(!state.has_searched());
        assert!(state.selected().is_none());
    }

    #[test]
    fn test_blank_query_is_ignored() {
        let mut state = SearchState::new();
        assert!(state.begin_search("   \t").is_none());
        assert_eq!(state.phase(), SearchPhase::Idle);
    }

    #[test]
    fn test_query_is_trimmed() {
        let mut state = SearchState::new();
        let ticket = state.begin_search("  A社の最新契約書は？ ").unwrap();
        assert_eq!(ticket.query(), "A社の最新契約書は？");
        assert_eq!(state.query(), "A社の最新契約書は？");
        assert!(state.is_loading());
    }

    #[test]
    fn test_success_selects_first_result() {
        let mut state = SearchState::new();
        let ticket = state.begin_search("A社の最新契約書は？").unwrap();

        assert!(state.complete(&ticket, answer("契約書Xが最新です", &["契約書X.pdf"])));
        assert_eq!(state.phase(), SearchPhase::Results);
        assert_eq!(state.answer(), Some("契約書Xが最新です"));
        assert_eq!(state.results().len(), 1);
        assert_eq!(state.selected().unwrap().name, "契約書X.pdf");
        assert!(!state.shows_no_matches());
    }

    #[test]
    fn test_empty_results_clear_selection() {
        let mut state = SearchState::new();
        let ticket = state.begin_search("q").unwrap();
        state.complete(&ticket, answer("nothing", &[]));

        assert_eq!(state.phase(), SearchPhase::Results);
        assert!(state.selected().is_none());
        assert!(state.shows_no_matches());
    }

    #[test]
    fn test_new_search_clears_selection_and_answer() {
        let mut state = SearchState::new();
        let ticket = state.begin_search("first").unwrap();
        state.complete(&ticket, answer("a", &["a.pdf", "b.pdf"]));
        assert!(state.selected().is_some());

        state.begin_search("second").unwrap();
        assert!(state.selected().is_none());
        assert!(state.answer().is_none());
        assert!(state.is_loading());
    }

    #[test]
    fn test_failure_clears_results() {
        let mut state = SearchState::new();
        let ticket = state.begin_search("first").unwrap();
        state.complete(&ticket, answer("a", &["a.pdf"]));

        let ticket = state.begin_search("second").unwrap();
        assert!(state.fail(&ticket, "検索中にエラーが発生しました。"));
        assert_eq!(state.phase(), SearchPhase::Error);
        assert!(state.results().is_empty());
        assert!(state.answer().is_none());
        assert!(state.selected().is_none());
        assert_eq!(state.error(), Some("検索中にエラーが発生しました。"));
        assert!(!state.shows_no_matches());
    }

    #[test]
    fn test_error_then_resubmit() {
        let mut state = SearchState::new();
        let ticket = state.begin_search("q").unwrap();
        state.fail(&ticket, "boom");

        let ticket = state.begin_search("q").unwrap();
        assert!(state.error().is_none());
        assert!(state.complete(&ticket, answer("ok", &["a.pdf"])));
        assert_eq!(state.phase(), SearchPhase::Results);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut state = SearchState::new();
        let old = state.begin_search("old").unwrap();
        let new = state.begin_search("new").unwrap();

        assert!(state.complete(&new, answer("new answer", &["new.pdf"])));
        assert!(!state.complete(&old, answer("old answer", &["old.pdf"])));
        assert!(!state.fail(&old, "late failure"));

        assert_eq!(state.answer(), Some("new answer"));
        assert_eq!(state.results()[0].name, "new.pdf");
        assert!(state.error().is_none());
    }

    #[test]
    fn test_reset_drops_in_flight_response() {
        let mut state = SearchState::new();
        let ticket = state.begin_search("q").unwrap();
        state.reset();

        assert!(!state.complete(&ticket, answer("late", &["a.pdf"])));
        assert_eq!(state.phase(), SearchPhase::Idle);
        assert!(state.results().is_empty());
    }

    #[test]
    fn test_select_by_key() {
        let mut state = SearchState::new();
        let ticket = state.begin_search("q").unwrap();
        state.complete(&ticket, answer("a", &["a.pdf", "b.pdf"]));

        let second_key = state.results()[1].key.clone();
        assert!(state.select(&second_key));
        assert!(state.is_selected(&second_key));
        assert_eq!(state.selected().unwrap().name, "b.pdf");

        assert!(!state.select("unknown"));
        assert_eq!(state.selected().unwrap().name, "b.pdf");
    }

    #[test]
    fn test_repeated_query_yields_identical_results() {
        let mut state = SearchState::new();
        let ticket = state.begin_search("q").unwrap();
        state.complete(&ticket, answer("a", &["a.pdf", "b.pdf"]));
        let first = state.results().to_vec();

        let ticket = state.begin_search("q").unwrap();
        state.complete(&ticket, answer("a", &["a.pdf", "b.pdf"]));
        assert_eq!(state.results(), first.as_slice());
    }

    #[test]
    fn test_blank_answer_is_hidden() {
        let mut state = SearchState::new();
        let ticket = state.begin_search("q").unwrap();
        state.complete(&ticket, answer("  ", &["a.pdf"]));
        assert!(state.answer().is_none());
    }
}
