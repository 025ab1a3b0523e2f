use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Display name for a context without a file name
pub const FALLBACK_NAME: &str = "関連資料";
/// Tag for a context without a category
pub const FALLBACK_TAG: &str = "AI分析";
pub const FALLBACK_AUTHOR: &str = "システム";
pub const FALLBACK_LAST_UPDATED: &str = "-";
/// Format reported when the file name has no extension
pub const DEFAULT_FORMAT: &str = "PDF";

/// Answer returned by the QA backend's `/ask` endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnswerResult {
    #[serde(default)]
    pub answer: Option<String>,
    pub contexts: Vec<ContextItem>,
}

/// Supporting snippet for an answer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContextItem {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub metadata: Option<ContextMetadata>,
}

/// Backend metadata attached to a context; unknown keys are ignored
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContextMetadata {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl ContextItem {
    pub fn category(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.category.as_deref())
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Result card shown in the UI, one per context item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Position in the backend's context list
    pub id: usize,
    /// Content-derived key; selection follows this, not `id`
    pub key: String,
    pub name: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub author: String,
    pub last_updated: String,
    pub format: String,
}

impl SearchResult {
    /// Map backend contexts into result cards, preserving order.
    pub fn from_contexts(contexts: &[ContextItem]) -> Vec<SearchResult> {
        let mut seen: HashMap<String, usize> = HashMap::new();

        contexts
            .iter()
            .enumerate()
            .map(|(id, ctx)| {
                let name = ctx
                    .file_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .unwrap_or(FALLBACK_NAME)
                    .to_string();

                // identical name+text pairs get an occurrence suffix
                let base_key = content_key(&name, &ctx.text);
                let occurrence = seen.entry(base_key.clone()).or_insert(0);
                let key = if *occurrence == 0 {
                    base_key
                } else {
                    format!("{}-{}", base_key, occurrence)
                };
                *occurrence += 1;

                let metadata = ctx.metadata.clone().unwrap_or_default();
                let tags = vec![ctx.category().unwrap_or(FALLBACK_TAG).to_string()];

                SearchResult {
                    id,
                    key,
                    format: format_for_file_name(&name),
                    name,
                    summary: ctx.text.clone(),
                    tags,
                    author: metadata
                        .author
                        .filter(|a| !a.trim().is_empty())
                        .unwrap_or_else(|| FALLBACK_AUTHOR.to_string()),
                    last_updated: metadata
                        .last_updated
                        .filter(|d| !d.trim().is_empty())
                        .unwrap_or_else(|| FALLBACK_LAST_UPDATED.to_string()),
                }
            })
            .collect()
    }
}

/// Human-readable document format from a file name extension
pub fn format_for_file_name(name: &str) -> String {
    let extension = name
        .rsplit_once('.')
        .map(|(stem, ext)| (stem, ext.trim()))
        .filter(|(stem, ext)| !stem.is_empty() && !ext.is_empty() && !ext.contains(['/', '\\', ' ']))
        .map(|(_, ext)| ext.to_lowercase());

    match extension.as_deref() {
        None => DEFAULT_FORMAT.to_string(),
        Some("pdf") => "PDF".to_string(),
        Some("doc" | "docx") => "Word".to_string(),
        Some("xls" | "xlsx" | "csv") => "Excel".to_string(),
        Some("ppt" | "pptx") => "PowerPoint".to_string(),
        Some("txt" | "md") => "Text".to_string(),
        Some(other) => other.to_uppercase(),
    }
}

fn content_key(name: &str, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update([0u8]);
    hasher.update(text.as_bytes());
    hasher
        .finalize()
        .iter()
        .take(8)
        .map(|b| format!("{:02x}", b))
        .collect()
}
