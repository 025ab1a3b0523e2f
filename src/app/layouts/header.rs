use dioxus::prelude::*;

use crate::shared::constants::APP_TITLE;

/// Sticky header; clicking the title returns to the landing view
#[component]
pub fn AppHeader(on_home: EventHandler<()>) -> Element {
    rsx! {
        header { class: "c-header",
            div { class: "c-header__brand",
                onclick: move |_| on_home.call(()),
                span { class: "c-header__logo", "📚" }
                span { "{APP_TITLE}" }
            }
        }
    }
}
