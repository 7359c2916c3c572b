//! Chunk output types.

use serde::{Deserialize, Serialize};

/// A token-bounded unit of text drawn from one or more consecutive pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Freshly generated per segmentation run; never reused.
    pub chunk_id: String,
    /// Copied from the source document.
    pub document_id: String,
    /// Copied from the source document.
    pub source_type: String,
    /// First page contributing to this chunk's text (inclusive).
    pub page_start: u32,
    /// Last page contributing to this chunk's text (inclusive).
    pub page_end: u32,
    /// Trimmed, newline-joined page text.
    pub text: String,
    /// Token count measured on the untrimmed buffer at emission time.
    pub token_count: usize,
}

/// An embedding vector paired with the chunk it was computed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkEmbedding {
    pub chunk_id: String,
    pub document_id: String,
    pub embedding: Vec<f32>,
    /// Model that produced the vector.
    pub model: String,
    /// Length of `embedding`.
    pub dimension: usize,
}
