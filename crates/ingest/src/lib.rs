//! Document ingestion pipeline: extraction → segmentation → embedding.
//!
//! ```text
//! file bytes ──► document::extract ──► Document
//! Document ──► segmenter::Segmenter ──► ordered Chunk list
//! Chunk list ──► embedding::embed_chunks ──► ChunkEmbedding list
//! ```
//!
//! The segmenter is the core: a single forward pass that accumulates page
//! text into a token-bounded buffer, cuts a chunk when the threshold is
//! crossed, and reseeds the buffer from the tail tokens of the emitted text.

pub mod document;
pub mod embedding;
pub mod pipeline;
pub mod segmenter;
pub mod tokenizer;

pub use pipeline::{IngestOutcome, IngestPipeline, PipelineError};
pub use segmenter::{SegmentError, Segmenter, SegmenterConfig};
pub use tokenizer::{Tokenizer, TokenizerError};
