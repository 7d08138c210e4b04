// piiveil-core/src/breaks.rs
//! Page and chunk markers for concatenated document text.
//!
//! Documents that carry page information are joined with `--- PAGE n ---`
//! headers. Long text without pages is cut into overlapping chunks headed by
//! `--- CHUNK n ---`. Short text without pages is returned as-is.

use serde::{Deserialize, Serialize};

use crate::config::ChunkingConfig;

/// Page information attached to a loaded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageMarker {
    /// Zero-based page index; rendered one-based.
    Index(u64),
    /// A page label used verbatim.
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentPage {
    pub content: String,
    #[serde(default)]
    pub page: Option<PageMarker>,
}

impl DocumentPage {
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into(), page: None }
    }

    pub fn with_page(mut self, page: PageMarker) -> Self {
        self.page = Some(page);
        self
    }
}

pub fn format_text_with_breaks(docs: &[DocumentPage], config: &ChunkingConfig) -> String {
    let has_page_info = docs.iter().any(|doc| match &doc.page {
        Some(PageMarker::Label(label)) => !label.is_empty(),
        Some(PageMarker::Index(_)) => true,
        None => false,
    });

    if has_page_info {
        return docs
            .iter()
            .map(|doc| match &doc.page {
                Some(PageMarker::Index(idx)) => format!("--- PAGE {} ---\n{}", idx + 1, doc.content),
                Some(PageMarker::Label(label)) if !label.is_empty() => {
                    format!("--- PAGE {} ---\n{}", label, doc.content)
                }
                _ => doc.content.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n\n");
    }

    let concatenated = docs
        .iter()
        .map(|doc| doc.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    if concatenated.chars().count() > config.chunk_threshold {
        chunk_text_content(&concatenated, config.chunk_size, config.overlap)
    } else {
        concatenated
    }
}

/// Splits `text` into chunks of at most `chunk_size` characters, preferring
/// to break at the last space, with `overlap` characters repeated between
/// neighbouring chunks.
pub fn chunk_text_content(text: &str, chunk_size: usize, overlap: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() || chunk_size == 0 || chars.len() <= chunk_size {
        return text.to_string();
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let mut end = (start + chunk_size).min(chars.len());

        if end < chars.len() {
            if let Some(space) = chars[start..end].iter().rposition(|&c| c == ' ') {
                if space > 0 {
                    end = start + space;
                }
            }
        }

        let chunk: String = chars[start..end].iter().collect();
        let chunk = chunk.trim();
        if !chunk.is_empty() {
            chunks.push(format!("--- CHUNK {} ---\n{}", chunks.len() + 1, chunk));
        }

        if end >= chars.len() {
            break;
        }
        start = end.saturating_sub(overlap).max(start + 1);
    }

    chunks.join("\n\n")
}
