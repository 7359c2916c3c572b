//! Token counting and encode/decode against a fixed BPE vocabulary.

use std::sync::Arc;

use thiserror::Error;
use tiktoken_rs::{cl100k_base, o200k_base, CoreBPE};

#[derive(Debug, Error)]
pub enum TokenizerError {
    #[error("unknown tokenizer vocabulary: {0}")]
    UnknownVocabulary(String),
    #[error("tokenizer initialization failed: {0}")]
    Init(String),
    #[error("token decode failed: {0}")]
    Decode(String),
}

/// Tokenizer adapter over a tiktoken BPE vocabulary.
///
/// The vocabulary is immutable once loaded, so a single instance may serve
/// concurrent segmentation calls; cloning shares the vocabulary.
///
/// Guarantees `count(text) == encode(text).len()`. Decoding an arbitrary
/// token sub-slice is NOT guaranteed to reproduce the exact original
/// substring: ids that do not align with merge boundaries may re-merge into
/// a slightly different spelling. Callers slicing overlap tails treat the
/// decoded text as an approximation.
#[derive(Clone)]
pub struct Tokenizer {
    bpe: Arc<CoreBPE>,
    vocabulary: String,
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("vocabulary", &self.vocabulary)
            .finish_non_exhaustive()
    }
}

impl Tokenizer {
    /// Load a vocabulary by name ("cl100k_base", "o200k_base").
    pub fn new(vocabulary: &str) -> Result<Self, TokenizerError> {
        let bpe = match vocabulary {
            "cl100k_base" => cl100k_base(),
            "o200k_base" => o200k_base(),
            other => return Err(TokenizerError::UnknownVocabulary(other.to_string())),
        }
        .map_err(|e| TokenizerError::Init(e.to_string()))?;

        Ok(Self {
            bpe: Arc::new(bpe),
            vocabulary: vocabulary.to_string(),
        })
    }

    pub fn vocabulary(&self) -> &str {
        &self.vocabulary
    }

    /// Number of tokens `text` decomposes into.
    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    /// Encode `text` to token ids.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        self.bpe.encode_ordinary(text)
    }

    /// Decode token ids back to text.
    pub fn decode(&self, tokens: Vec<u32>) -> Result<String, TokenizerError> {
        self.bpe
            .decode(tokens)
            .map_err(|e| TokenizerError::Decode(e.to_string()))
    }
}
