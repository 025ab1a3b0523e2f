use dioxus::prelude::*;

use crate::domain::models::SearchResult;

/// One search result; clicking selects it for the preview pane
#[component]
pub fn ResultCard(result: SearchResult, selected: bool, on_select: EventHandler<String>) -> Element {
    let class = if selected {
        "c-result-card c-result-card--selected"
    } else {
        "c-result-card"
    };
    let key = result.key.clone();

    rsx! {
        article { class: "{class}",
            onclick: move |_| on_select.call(key.clone()),
            h4 { class: "c-result-card__name", "{result.name}" }
            p { class: "c-result-card__summary", "{result.summary}" }
            div { class: "c-result-card__tags",
                for tag in result.tags.iter() {
                    span { key: "{tag}", class: "c-result-card__tag", "タグ（{tag}）" }
                }
            }
            div { class: "c-result-card__meta",
                span { "作成者: {result.author}" }
                span { "最終更新: {result.last_updated}" }
                span { "形式: {result.format}" }
            }
        }
    }
}
