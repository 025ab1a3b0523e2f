pub mod common;
pub mod search_form;
pub mod answer_panel;
pub mod result_card;
pub mod result_list;
pub mod preview_pane;

// Upload panel - input is read through web-sys in the browser, stubbed on the server
pub mod upload_panel;

pub use common::{ErrorBanner, LoadingSpinner};
pub use search_form::SearchForm;
pub use answer_panel::AnswerPanel;
pub use result_card::ResultCard;
pub use result_list::ResultList;
pub use preview_pane::PreviewPane;
pub use upload_panel::UploadPanel;
