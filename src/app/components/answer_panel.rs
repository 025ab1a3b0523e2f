use dioxus::prelude::*;

/// AI answer above the result list
#[component]
pub fn AnswerPanel(answer: String) -> Element {
    rsx! {
        section { class: "c-answer",
            h3 { class: "c-answer__title", "AIの回答" }
            p { class: "c-answer__text", "{answer}" }
        }
    }
}
