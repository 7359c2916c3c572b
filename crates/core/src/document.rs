use serde::{Deserialize, Serialize};

/// One unit of extracted text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// 1-based physical page number, strictly increasing across the document.
    pub page_number: u32,
    /// Raw extracted text, possibly empty.
    pub text: String,
    /// Character count of `text`.
    pub char_count: usize,
}

impl Page {
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            page_number,
            char_count: text.chars().count(),
            text,
        }
    }
}

/// An ordered sequence of pages plus header metadata.
///
/// Read-only input to the segmenter; pages never change during a
/// segmentation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Stable opaque identifier (SHA-256 hex of the source bytes when
    /// produced by our extractor).
    pub document_id: String,
    /// Origin tag: "pdf", "txt", ...
    pub source_type: String,
    /// Original file name.
    pub source_name: String,
    /// Total page count; also the fallback end page for a trailing chunk.
    pub page_count: u32,
    /// Pages in physical order.
    pub pages: Vec<Page>,
}

impl Document {
    /// Total character count across all pages.
    pub fn total_chars(&self) -> usize {
        self.pages.iter().map(|p| p.char_count).sum()
    }
}
