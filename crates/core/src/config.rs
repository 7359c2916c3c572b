use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_usize(key: &str, default: usize) -> usize {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub chunking: ChunkingConfig,
    pub embedding: EmbeddingConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            chunking: ChunkingConfig::from_env(),
            embedding: EmbeddingConfig::from_env(),
        }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!(
            "  chunking:   max_tokens={}, overlap_tokens={}, vocabulary={}",
            self.chunking.max_tokens,
            self.chunking.overlap_tokens,
            self.chunking.vocabulary,
        );
        tracing::info!(
            "  embedding:  provider={}, model={}, dimensions={}, batch_size={}",
            self.embedding.provider,
            self.embedding.model,
            self.embedding.dimensions,
            self.embedding.batch_size,
        );
    }
}

// ── Chunking ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Token threshold at which the accumulated buffer is cut.
    pub max_tokens: usize,
    /// Tokens carried from the tail of a finished chunk into the next.
    pub overlap_tokens: usize,
    /// Tokenizer vocabulary name ("cl100k_base", "o200k_base").
    pub vocabulary: String,
}

impl ChunkingConfig {
    fn from_env() -> Self {
        Self {
            max_tokens: env_usize("CHUNK_MAX_TOKENS", 500),
            overlap_tokens: env_usize("CHUNK_OVERLAP_TOKENS", 50),
            vocabulary: env_or("TOKENIZER_VOCABULARY", "cl100k_base"),
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            overlap_tokens: 50,
            vocabulary: "cl100k_base".to_string(),
        }
    }
}

// ── Embedding ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// "openai" or "ollama".
    pub provider: String,
    pub model: String,
    pub dimensions: usize,
    pub batch_size: usize,
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub ollama_url: String,
}

impl EmbeddingConfig {
    fn from_env() -> Self {
        Self {
            provider: env_or("EMBEDDING_PROVIDER", "openai"),
            model: env_or("EMBEDDING_MODEL", "text-embedding-3-small"),
            dimensions: env_usize("EMBEDDING_DIMENSIONS", 1536),
            batch_size: env_usize("EMBEDDING_BATCH_SIZE", 64),
            openai_api_key: env_opt("OPENAI_API_KEY"),
            openai_base_url: env_opt("OPENAI_BASE_URL"),
            ollama_url: env_or("OLLAMA_URL", "http://localhost:11434"),
        }
    }

    pub fn is_configured(&self) -> bool {
        match self.provider.as_str() {
            "openai" => self.openai_api_key.is_some(),
            "ollama" => true,
            _ => false,
        }
    }
}
