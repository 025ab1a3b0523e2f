// Routes shared by the UI and the BFF
pub const ASK_ROUTE: &str = "/api/ask";
pub const UPLOAD_ROUTE: &str = "/api/upload";

/// Multipart field carrying the uploaded file
pub const UPLOAD_FIELD: &str = "file";
/// Blob container every upload lands in
pub const UPLOAD_CONTAINER: &str = "mof2-blob-new";
/// 50MB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Proof-of-origin header sent to the QA backend
pub const BFF_SECRET_HEADER: &str = "x-bff-secret";

pub const DEFAULT_SESSION_EMAIL_HEADER: &str = "x-forwarded-email";
pub const DEFAULT_SESSION_ID_TOKEN_HEADER: &str = "x-forwarded-id-token";

// UI copy
pub const APP_TITLE: &str = "司書AIアプリ MOF";
pub const SEARCH_ERROR_MESSAGE: &str = "検索中にエラーが発生しました。";
pub const NO_MATCHES_MESSAGE: &str = "該当するファイルが見つかりませんでした。";
pub const UPLOAD_SUCCESS_MESSAGE: &str = "アップロード成功";
pub const UPLOAD_FAILURE_MESSAGE: &str = "アップロード失敗";
pub const MISSING_FILE_MESSAGE: &str = "ファイルがありません";
pub const NO_FILE_SELECTED_MESSAGE: &str = "保存するファイルを選択してください";
