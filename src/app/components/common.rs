use dioxus::prelude::*;

// Reusable Loading Component (BEM: c-loading)
#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div { class: "c-loading",
            div { class: "c-loading__spinner" }
        }
    }
}

// Reusable Error Banner (BEM: c-error)
#[component]
pub fn ErrorBanner(message: String) -> Element {
    rsx! {
        div { class: "c-error", role: "alert", "{message}" }
    }
}
