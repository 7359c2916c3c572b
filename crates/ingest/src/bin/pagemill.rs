//! pagemill: chunk a paginated document, optionally embed the chunks.
//!
//! Extracts the file, segments it into token-bounded chunks, and prints one
//! JSON record per line: chunks first, then (with `--embed`) one embedding
//! record per chunk.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use pagemill_core::config::{load_dotenv, Config};
use pagemill_ingest::embedding::build_embedder;
use pagemill_ingest::{IngestPipeline, Segmenter, SegmenterConfig, Tokenizer};

/// Chunk a paginated document (.pdf, .txt) for embedding and retrieval.
#[derive(Parser, Debug)]
#[command(name = "pagemill", version, about)]
struct Cli {
    /// File to ingest.
    file: PathBuf,

    /// Token threshold at which a chunk is cut (overrides CHUNK_MAX_TOKENS).
    #[arg(long)]
    max_tokens: Option<usize>,

    /// Tokens carried over into the next chunk (overrides CHUNK_OVERLAP_TOKENS).
    #[arg(long)]
    overlap_tokens: Option<usize>,

    /// Tokenizer vocabulary (overrides TOKENIZER_VOCABULARY).
    #[arg(long)]
    vocabulary: Option<String>,

    /// Also embed the chunks with the configured provider.
    #[arg(long)]
    embed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    load_dotenv();
    let cli = Cli::parse();
    let config = Config::from_env();
    config.log_summary();

    let mut chunking = config.chunking.clone();
    if let Some(max_tokens) = cli.max_tokens {
        chunking.max_tokens = max_tokens;
    }
    if let Some(overlap_tokens) = cli.overlap_tokens {
        chunking.overlap_tokens = overlap_tokens;
    }
    if let Some(vocabulary) = cli.vocabulary {
        chunking.vocabulary = vocabulary;
    }

    let tokenizer = Tokenizer::new(&chunking.vocabulary)?;
    let segmenter = Segmenter::new(SegmenterConfig::from(&chunking), tokenizer)?;

    let mut pipeline = IngestPipeline::new(segmenter);
    if cli.embed {
        let embedder = build_embedder(&config.embedding)?;
        pipeline = pipeline.with_embedder(embedder, config.embedding.batch_size);
    }

    let outcome = pipeline.run_file(&cli.file).await?;

    for chunk in &outcome.chunks {
        println!("{}", serde_json::to_string(chunk)?);
    }
    for record in &outcome.embeddings {
        println!("{}", serde_json::to_string(record)?);
    }

    info!(
        chunks = outcome.chunks.len(),
        embeddings = outcome.embeddings.len(),
        "done"
    );
    Ok(())
}
