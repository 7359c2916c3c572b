//! Order-preserving embedding of chunk lists.

use pagemill_core::{Chunk, ChunkEmbedding};

use super::traits::{Embedder, EmbeddingError};

/// Embed `chunks` in windows of `batch_size`, yielding one record per chunk
/// in input order.
///
/// Any backend failure aborts the whole call; partial results are never
/// returned. Retrying a failed batch is the caller's concern.
pub async fn embed_chunks(
    embedder: &dyn Embedder,
    chunks: &[Chunk],
    batch_size: usize,
) -> Result<Vec<ChunkEmbedding>, EmbeddingError> {
    let mut records = Vec::with_capacity(chunks.len());

    for window in chunks.chunks(batch_size.max(1)) {
        let texts: Vec<&str> = window.iter().map(|c| c.text.as_str()).collect();
        let vectors = embedder.embed_batch(&texts).await?;

        if vectors.len() != window.len() {
            return Err(EmbeddingError::CountMismatch {
                sent: window.len(),
                received: vectors.len(),
            });
        }

        for (chunk, vector) in window.iter().zip(vectors) {
            records.push(ChunkEmbedding {
                chunk_id: chunk.chunk_id.clone(),
                document_id: chunk.document_id.clone(),
                dimension: vector.len(),
                embedding: vector,
                model: embedder.model().to_string(),
            });
        }
    }

    Ok(records)
}
