//! Document upload panel
//!
//! Reads the file from the input element at click time (browser only),
//! then posts it to the upload proxy.

use dioxus::prelude::*;

use crate::shared::hooks::{UPLOAD_INPUT_ID, UploadStatus, use_document_upload};

#[component]
pub fn UploadPanel(#[props(default)] compact: bool) -> Element {
    let mut upload = use_document_upload();
    let status = upload.status.read().clone();
    let uploading = matches!(status, UploadStatus::Uploading);

    let class = if compact { "c-upload c-upload--compact" } else { "c-upload" };

    rsx! {
        section { class: "{class}",
            h3 { class: "c-upload__title", "資料のアップロード" }
            input {
                id: UPLOAD_INPUT_ID,
                class: "c-upload__input",
                r#type: "file",
                disabled: uploading,
            }
            button {
                class: "c-upload__button",
                r#type: "button",
                disabled: uploading,
                onclick: move |_| upload.upload_selected(),
                if uploading { "アップロード中..." } else { "ファイルを保存する" }
            }
            match status {
                UploadStatus::Idle | UploadStatus::Uploading => rsx! {},
                UploadStatus::Uploaded { message, url } => rsx! {
                    p { class: "c-upload__status",
                        "{message}: "
                        a { class: "c-upload__link", href: "{url}", target: "_blank", rel: "noopener", "{url}" }
                    }
                },
                UploadStatus::Failed(message) => rsx! {
                    p { class: "c-upload__status c-upload__status--error", "{message}" }
                },
            }
        }
    }
}
