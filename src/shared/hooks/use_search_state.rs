use dioxus::prelude::*;

use crate::shared::constants::SEARCH_ERROR_MESSAGE;
use crate::shared::services::ApiService;
use crate::shared::state::SearchState;

/// Search page state: the state machine plus the bound input text
#[derive(Clone, Copy, PartialEq)]
pub struct SearchController {
    pub state: Signal<SearchState>,
    pub input: Signal<String>,
}

impl SearchController {
    /// Submit the current input; blank input does nothing
    pub fn submit(&mut self) {
        let ticket = {
            let input = self.input.read();
            self.state.write().begin_search(&input)
        };
        let Some(ticket) = ticket else {
            return;
        };

        let mut state = self.state;
        spawn(async move {
            let outcome = ApiService::new().ask(ticket.query()).await;

            let applied = match outcome {
                Ok(result) => state.write().complete(&ticket, result),
                Err(e) => {
                    // every failure shows the same banner
                    tracing::warn!("Search request failed: {}", e);
                    state.write().fail(&ticket, SEARCH_ERROR_MESSAGE)
                }
            };

            if !applied {
                tracing::debug!(
                    generation = ticket.generation(),
                    "Dropped stale search response"
                );
            }
        });
    }

    pub fn select(&mut self, key: &str) {
        self.state.write().select(key);
    }

    /// Return to the landing view
    pub fn reset(&mut self) {
        self.state.write().reset();
    }
}

/// Hook to manage the search page state
pub fn use_search_state() -> SearchController {
    let state = use_signal(SearchState::new);
    let input = use_signal(String::new);

    SearchController { state, input }
}
