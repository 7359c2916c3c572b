//! Embedding backends and the order-preserving chunk batcher.
//!
//! The backend is an injected collaborator: callers construct one, share it
//! behind an `Arc`, and own its lifecycle. Nothing in this module keeps a
//! process-wide client.

pub mod batcher;
pub mod ollama;
pub mod openai;
pub mod traits;

use std::sync::Arc;

use pagemill_core::config::EmbeddingConfig;

pub use batcher::embed_chunks;
pub use ollama::OllamaEmbedder;
pub use openai::OpenAiEmbedder;
pub use traits::{Embedder, EmbeddingError};

/// Construct the embedding backend named by the config.
pub fn build_embedder(config: &EmbeddingConfig) -> Result<Arc<dyn Embedder>, EmbeddingError> {
    match config.provider.as_str() {
        "openai" => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or_else(|| EmbeddingError::Api("OPENAI_API_KEY is not set".to_string()))?;
            Ok(Arc::new(OpenAiEmbedder::new(
                api_key,
                config.model.clone(),
                config.openai_base_url.clone(),
                config.dimensions,
            )))
        }
        "ollama" => Ok(Arc::new(OllamaEmbedder::new(
            config.ollama_url.clone(),
            config.model.clone(),
            config.dimensions,
        ))),
        other => Err(EmbeddingError::UnsupportedProvider(other.to_string())),
    }
}
