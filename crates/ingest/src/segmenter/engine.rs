//! The segmentation engine: accumulator fold, cut decision, overlap reseed.

use pagemill_core::{Chunk, Document, Page};
use uuid::Uuid;

use super::types::{SegmentError, SegmenterConfig};
use crate::tokenizer::Tokenizer;

/// Splits documents into ordered, overlapping, token-bounded chunks.
///
/// Holds only configuration and a shared tokenizer; all loop state lives in
/// a per-call [`Accumulator`], so one instance may serve concurrent
/// segmentations and never memoizes across calls.
pub struct Segmenter {
    config: SegmenterConfig,
    tokenizer: Tokenizer,
}

/// Pending buffer state carried across the page fold.
#[derive(Debug, Default)]
pub(crate) struct Accumulator {
    /// Accumulated pending text.
    pub(crate) text: String,
    /// First page contributing to `text`; unset until a page is consumed.
    pub(crate) start_page: Option<u32>,
    /// Pages appended since the last cut. The trailing flush only emits when
    /// at least one page landed after the previous cut, so a buffer holding
    /// nothing but carried-over overlap is not echoed as its own chunk.
    pub(crate) pages_since_cut: usize,
}

impl Accumulator {
    fn claim_start(&mut self, page_number: u32) {
        if self.start_page.is_none() {
            self.start_page = Some(page_number);
        }
    }
}

impl Segmenter {
    /// Validates the configuration up front; a zero threshold never reaches
    /// the page loop.
    pub fn new(config: SegmenterConfig, tokenizer: Tokenizer) -> Result<Self, SegmentError> {
        if config.max_tokens == 0 {
            return Err(SegmentError::InvalidConfiguration(
                "max_tokens must be positive".to_string(),
            ));
        }
        Ok(Self { config, tokenizer })
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Segment a document into ordered chunks.
    ///
    /// The document is validated before any page is processed; on error no
    /// chunks are returned.
    pub fn segment(&self, document: &Document) -> Result<Vec<Chunk>, SegmentError> {
        validate(document)?;

        let mut chunks = Vec::new();
        let mut acc = Accumulator::default();

        for page in &document.pages {
            if let Some(chunk) = self.feed(&mut acc, page, document)? {
                chunks.push(chunk);
            }
        }
        if let Some(chunk) = self.finish(acc, document)? {
            chunks.push(chunk);
        }

        tracing::debug!(
            document_id = %document.document_id,
            chunk_count = chunks.len(),
            "segmented document"
        );
        Ok(chunks)
    }

    /// Consume one page: append its text, cut a chunk if the token threshold
    /// is crossed, and reseed the accumulator from the tail of the cut text.
    pub(crate) fn feed(
        &self,
        acc: &mut Accumulator,
        page: &Page,
        document: &Document,
    ) -> Result<Option<Chunk>, SegmentError> {
        acc.claim_start(page.page_number);
        acc.text.push('\n');
        acc.text.push_str(&page.text);
        acc.pages_since_cut += 1;

        let token_count = self.tokenizer.count(&acc.text);
        if token_count < self.config.max_tokens {
            return Ok(None);
        }

        let text = acc.text.trim();
        if text.is_empty() {
            // All whitespace; nothing worth emitting yet, keep accumulating.
            return Ok(None);
        }

        let chunk = build_chunk(
            document,
            acc.start_page.unwrap_or(page.page_number),
            page.page_number,
            text,
            token_count,
        );

        // Reseed: the last `overlap_tokens` ids of the untrimmed buffer,
        // decoded back to text. The decode of a mid-merge slice may differ
        // from the literal tail substring; that is accepted.
        let ids = self.tokenizer.encode(&acc.text);
        let tail_start = ids.len().saturating_sub(self.config.overlap_tokens);
        acc.text = self.tokenizer.decode(ids[tail_start..].to_vec())?;
        acc.start_page = Some(page.page_number);
        acc.pages_since_cut = 0;

        Ok(Some(chunk))
    }

    /// Flush whatever the fold left behind as a trailing chunk, spanning to
    /// the document's declared page count.
    pub(crate) fn finish(
        &self,
        acc: Accumulator,
        document: &Document,
    ) -> Result<Option<Chunk>, SegmentError> {
        if acc.pages_since_cut == 0 {
            return Ok(None);
        }
        let text = acc.text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let token_count = self.tokenizer.count(&acc.text);
        let page_start = acc.start_page.unwrap_or(document.page_count);

        Ok(Some(build_chunk(
            document,
            page_start,
            document.page_count,
            text,
            token_count,
        )))
    }
}

/// Reject malformed documents before the fold touches any page.
fn validate(document: &Document) -> Result<(), SegmentError> {
    if document.document_id.is_empty() {
        return Err(SegmentError::MalformedDocument(
            "document_id is empty".to_string(),
        ));
    }
    if (document.pages.len() as u32) > document.page_count {
        return Err(SegmentError::MalformedDocument(format!(
            "page_count {} is smaller than the {} pages supplied",
            document.page_count,
            document.pages.len()
        )));
    }
    let mut previous = 0u32;
    for page in &document.pages {
        if page.page_number == 0 {
            return Err(SegmentError::MalformedDocument(
                "page numbers are 1-based, got 0".to_string(),
            ));
        }
        if page.page_number <= previous {
            return Err(SegmentError::MalformedDocument(format!(
                "page numbers must be strictly increasing, got {} after {}",
                page.page_number, previous
            )));
        }
        previous = page.page_number;
    }
    Ok(())
}

/// Pure chunk construction: trim, fresh id, verbatim provenance copies.
fn build_chunk(
    document: &Document,
    page_start: u32,
    page_end: u32,
    text: &str,
    token_count: usize,
) -> Chunk {
    Chunk {
        chunk_id: Uuid::new_v4().to_string(),
        document_id: document.document_id.clone(),
        source_type: document.source_type.clone(),
        page_start,
        page_end,
        text: text.to_string(),
        token_count,
    }
}
