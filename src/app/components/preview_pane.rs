use dioxus::prelude::*;

use crate::domain::models::SearchResult;

/// Details of the selected result
#[component]
pub fn PreviewPane(selected: Option<SearchResult>) -> Element {
    rsx! {
        aside { class: "c-preview",
            h3 { class: "c-preview__title", "プレビュー" }
            match selected {
                Some(result) => rsx! {
                    div { class: "c-preview__name", "{result.name}" }
                    p { class: "c-preview__field-label", "作成者" }
                    p { class: "c-preview__field-value", "{result.author}" }
                    p { class: "c-preview__field-label", "最終更新" }
                    p { class: "c-preview__field-value", "{result.last_updated}" }
                    p { class: "c-preview__field-label", "形式" }
                    p { class: "c-preview__field-value", "{result.format}" }
                },
                None => rsx! {
                    div { class: "c-preview__empty", "リストからファイルを選択" }
                },
            }
        }
    }
}
