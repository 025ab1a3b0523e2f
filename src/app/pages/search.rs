use dioxus::prelude::*;

use crate::app::components::{
    AnswerPanel, ErrorBanner, LoadingSpinner, PreviewPane, ResultList, SearchForm, UploadPanel,
};
use crate::app::layouts::AppHeader;
use crate::shared::constants::APP_TITLE;
use crate::shared::hooks::use_search_state;
use crate::shared::state::{SearchPhase, SearchState};

const SEARCH_PLACEHOLDER: &str = "例：A社の最新契約書は？";

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
    #[route("/")]
    Home {},
}

#[component]
pub fn App() -> Element {
    use_effect(|| {
        tracing::info!("Search app initialized");
    });

    rsx! {
        Router::<Route> {}
    }
}

#[component]
fn Layout() -> Element {
    // Bundled by build.rs from assets/css/main.css
    const BUNDLE_CSS: Asset = asset!("/assets/dist/bundle.css");

    rsx! {
        document::Title { "{APP_TITLE}" }
        document::Link {
            rel: "stylesheet",
            href: BUNDLE_CSS
        },
        Outlet::<Route> {}
    }
}

/// Heading above the result list
pub fn results_heading(state: &SearchState) -> String {
    if state.is_loading() {
        "検索中...".to_string()
    } else {
        format!("検索結果 : {} 件", state.results().len())
    }
}

/// Landing view until the first search, then results with a preview pane
#[component]
fn Home() -> Element {
    let mut search = use_search_state();
    let state = search.state.read().clone();

    rsx! {
        AppHeader { on_home: move |_| search.reset() }

        if !state.has_searched() {
            div { class: "c-landing",
                h1 { class: "c-landing__title", "社内資料をAIで検索" }
                SearchForm {
                    value: search.input,
                    on_submit: move |_| search.submit(),
                    placeholder: SEARCH_PLACEHOLDER.to_string(),
                }
                UploadPanel {}
            }
        } else {
            div { class: "c-results-layout",
                main { class: "c-results-layout__main",
                    SearchForm {
                        value: search.input,
                        on_submit: move |_| search.submit(),
                        placeholder: SEARCH_PLACEHOLDER.to_string(),
                        compact: true,
                    }

                    if let Some(error) = state.error() {
                        ErrorBanner { message: error.to_string() }
                    }

                    if let Some(answer) = state.answer() {
                        AnswerPanel { answer: answer.to_string() }
                    }

                    h2 { class: "c-result-list__heading", "{results_heading(&state)}" }

                    if state.is_loading() {
                        LoadingSpinner {}
                    } else if state.phase() == SearchPhase::Results {
                        ResultList {
                            results: state.results().to_vec(),
                            selected_key: state.selected_key().map(str::to_string),
                            on_select: move |key: String| search.select(&key),
                        }
                    }

                    UploadPanel { compact: true }
                }
                div { class: "c-results-layout__preview",
                    PreviewPane { selected: state.selected().cloned() }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{AnswerResult, ContextItem};

    #[test]
    fn test_results_heading() {
        let mut state = SearchState::new();
        let ticket = state.begin_search("q").unwrap();
        assert_eq!(results_heading(&state), "検索中...");

        state.complete(
            &ticket,
            AnswerResult {
                answer: None,
                contexts: vec![ContextItem::default(), ContextItem::default()],
            },
        );
        assert_eq!(results_heading(&state), "検索結果 : 2 件");
    }
}
