//! End-to-end ingestion: extract → validate → segment → embed.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use pagemill_core::{Chunk, ChunkEmbedding, Document};

use crate::document::{extract_file, ExtractionError};
use crate::embedding::{embed_chunks, Embedder, EmbeddingError};
use crate::segmenter::{SegmentError, Segmenter};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("segmentation failed: {0}")]
    Segmentation(#[from] SegmentError),

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),
}

/// Everything produced by ingesting one document.
#[derive(Debug)]
pub struct IngestOutcome {
    pub document: Document,
    pub chunks: Vec<Chunk>,
    pub embeddings: Vec<ChunkEmbedding>,
}

/// Orchestrates the per-document pipeline.
///
/// The embedding backend is an injected collaborator whose lifecycle the
/// caller owns; without one the pipeline stops after segmentation. There is
/// no cancellation inside a document; callers wanting a deadline enforce it
/// between document-level calls.
pub struct IngestPipeline {
    segmenter: Segmenter,
    embedder: Option<Arc<dyn Embedder>>,
    batch_size: usize,
}

impl IngestPipeline {
    pub fn new(segmenter: Segmenter) -> Self {
        Self {
            segmenter,
            embedder: None,
            batch_size: 64,
        }
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>, batch_size: usize) -> Self {
        self.embedder = Some(embedder);
        self.batch_size = batch_size;
        self
    }

    /// Extract a file from disk, then segment and (if configured) embed it.
    pub async fn run_file(&self, path: &Path) -> Result<IngestOutcome, PipelineError> {
        let document = extract_file(path)?;
        info!(
            document_id = %document.document_id,
            source = %document.source_name,
            pages = document.pages.len(),
            chars = document.total_chars(),
            "extracted document"
        );
        self.run_document(document).await
    }

    /// Segment and (if configured) embed an already-extracted document.
    pub async fn run_document(&self, document: Document) -> Result<IngestOutcome, PipelineError> {
        let chunks = self.segmenter.segment(&document)?;
        info!(
            document_id = %document.document_id,
            chunk_count = chunks.len(),
            "segmented document"
        );

        let embeddings = match &self.embedder {
            Some(embedder) => {
                let records = embed_chunks(embedder.as_ref(), &chunks, self.batch_size).await?;
                info!(
                    document_id = %document.document_id,
                    embedding_count = records.len(),
                    model = embedder.model(),
                    "embedded chunks"
                );
                records
            }
            None => Vec::new(),
        };

        Ok(IngestOutcome {
            document,
            chunks,
            embeddings,
        })
    }
}
