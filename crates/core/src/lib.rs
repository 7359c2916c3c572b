pub mod chunk;
pub mod config;
pub mod document;

pub use chunk::{Chunk, ChunkEmbedding};
pub use config::Config;
pub use document::{Document, Page};
