//! Search form component
//!
//! Large centered box on the landing view, compact bar above the results.

use dioxus::prelude::*;

#[component]
pub fn SearchForm(
    value: Signal<String>,
    on_submit: EventHandler<()>,
    placeholder: String,
    #[props(default)] compact: bool,
) -> Element {
    let mut value = value;
    let class = if compact {
        "c-search-form c-search-form--compact"
    } else {
        "c-search-form"
    };

    rsx! {
        form { class: "{class}",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_submit.call(());
            },
            div { class: "c-search-form__box",
                input {
                    class: "c-search-form__input",
                    r#type: "text",
                    placeholder: "{placeholder}",
                    value: "{value}",
                    oninput: move |evt| value.set(evt.value()),
                }
            }
            if !compact {
                p { class: "c-search-form__hint", "Enterで検索" }
            }
        }
    }
}
