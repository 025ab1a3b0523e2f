use dioxus::prelude::*;

use super::ResultCard;
use crate::domain::models::SearchResult;
use crate::shared::constants::NO_MATCHES_MESSAGE;

#[component]
pub fn ResultList(
    results: Vec<SearchResult>,
    selected_key: Option<String>,
    on_select: EventHandler<String>,
) -> Element {
    if results.is_empty() {
        return rsx! {
            p { class: "c-result-list__empty", "{NO_MATCHES_MESSAGE}" }
        };
    }

    rsx! {
        div { class: "c-result-list",
            for result in results {
                ResultCard {
                    key: "{result.key}",
                    selected: selected_key.as_deref() == Some(result.key.as_str()),
                    result: result.clone(),
                    on_select: on_select,
                }
            }
        }
    }
}
