//! File-to-document extraction.
//!
//! Turns raw source bytes into a [`Document`]: an ordered page list with a
//! content-hash identifier. Dispatches by file extension: PDF (page-aware)
//! and plain text (single page).

mod pdf;
mod txt;

use std::path::Path;

use sha2::{Digest, Sha256};
use thiserror::Error;

use pagemill_core::Document;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a file from disk and extract it into a [`Document`].
pub fn extract_file(path: &Path) -> Result<Document, ExtractionError> {
    let bytes = std::fs::read(path)?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    extract_bytes(&bytes, &filename)
}

/// Extract document pages from raw bytes, dispatching on the file extension.
///
/// The document id is the SHA-256 hex digest of `bytes`, so re-ingesting
/// identical content yields the same id.
pub fn extract_bytes(bytes: &[u8], filename: &str) -> Result<Document, ExtractionError> {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    let pages = match ext.as_str() {
        "pdf" => pdf::extract_pdf(bytes)?,
        "txt" | "text" => txt::extract_txt(bytes)?,
        other => return Err(ExtractionError::UnsupportedType(other.to_string())),
    };

    let digest = Sha256::digest(bytes);

    Ok(Document {
        document_id: format!("{digest:x}"),
        source_type: ext,
        source_name: filename.to_string(),
        page_count: pages.len() as u32,
        pages,
    })
}
