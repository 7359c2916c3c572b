//! Segmenter configuration and error types.

use thiserror::Error;

use crate::tokenizer::TokenizerError;

/// Configuration for the chunk segmenter, fixed at construction.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Token threshold at which the accumulated buffer is cut (default: 500).
    pub max_tokens: usize,
    /// Tokens retained from the tail of a finished chunk to seed the next
    /// (default: 50). May exceed `max_tokens`; the threshold check still
    /// converges.
    pub overlap_tokens: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            overlap_tokens: 50,
        }
    }
}

impl From<&pagemill_core::config::ChunkingConfig> for SegmenterConfig {
    fn from(config: &pagemill_core::config::ChunkingConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            overlap_tokens: config.overlap_tokens,
        }
    }
}

#[derive(Debug, Error)]
pub enum SegmentError {
    /// Rejected at construction, never mid-stream.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Surfaced before any chunk is emitted.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// Aborts the whole call; partial chunk lists are never returned.
    #[error("tokenization failed: {0}")]
    Tokenization(#[from] TokenizerError),
}
