//! Tests for the segmentation engine.

use pagemill_core::{Document, Page};

use super::engine::{Accumulator, Segmenter};
use super::types::{SegmentError, SegmenterConfig};
use crate::tokenizer::Tokenizer;

fn tokenizer() -> Tokenizer {
    Tokenizer::new("cl100k_base").unwrap()
}

fn segmenter(max_tokens: usize, overlap_tokens: usize) -> Segmenter {
    Segmenter::new(
        SegmenterConfig {
            max_tokens,
            overlap_tokens,
        },
        tokenizer(),
    )
    .unwrap()
}

fn make_doc(pages: Vec<(u32, &str)>) -> Document {
    let page_count = pages.last().map(|(n, _)| *n).unwrap_or(0);
    Document {
        document_id: "doc-1".to_string(),
        source_type: "pdf".to_string(),
        source_name: "test.pdf".to_string(),
        page_count,
        pages: pages
            .into_iter()
            .map(|(n, text)| Page::new(n, text))
            .collect(),
    }
}

/// Repeat `word` until the text measures at least `min` tokens.
fn text_with_min_tokens(word: &str, min: usize) -> String {
    let tok = tokenizer();
    let mut text = String::new();
    while tok.count(&text) < min {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(word);
    }
    text
}

// ── Boundary cases ──────────────────────────────────────────────────

#[test]
fn empty_document_yields_no_chunks() {
    let chunks = segmenter(10, 3).segment(&make_doc(vec![])).unwrap();
    assert!(chunks.is_empty());
}

#[test]
fn whitespace_only_document_yields_no_chunks() {
    let doc = make_doc(vec![(1, "   \n\t  "), (2, "")]);
    let chunks = segmenter(10, 3).segment(&doc).unwrap();
    assert!(chunks.is_empty());
}

#[test]
fn single_page_below_threshold_yields_one_chunk() {
    let doc = make_doc(vec![(1, "Short page.")]);
    let chunks = segmenter(500, 50).segment(&doc).unwrap();

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].page_start, 1);
    assert_eq!(chunks[0].page_end, 1);
    assert_eq!(chunks[0].text, "Short page.");
    // Token count is measured on the untrimmed buffer, leading newline included.
    assert_eq!(chunks[0].token_count, tokenizer().count("\nShort page."));
}

#[test]
fn single_oversized_page_yields_exactly_one_chunk() {
    let text = text_with_min_tokens("alpha", 20);
    let doc = make_doc(vec![(1, text.as_str())]);
    let chunks = segmenter(10, 3).segment(&doc).unwrap();

    // The cut fires on page 1; the leftover overlap tail is carried-over
    // text only and is not echoed as a second chunk.
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].page_start, 1);
    assert_eq!(chunks[0].page_end, 1);
    assert!(chunks[0].token_count >= 10);
}

// ── Cut and overlap behavior ────────────────────────────────────────

#[test]
fn threshold_cut_then_overlap_seeded_trailing_chunk() {
    let tok = tokenizer();
    let page1 = text_with_min_tokens("alpha", 20);
    let page2 = text_with_min_tokens("bravo", 5);
    let doc = make_doc(vec![(1, page1.as_str()), (2, page2.as_str())]);

    let chunks = segmenter(10, 3).segment(&doc).unwrap();
    assert_eq!(chunks.len(), 2);

    // First chunk: the accumulation that crossed the threshold at page 1.
    let buffer1 = format!("\n{page1}");
    assert_eq!(chunks[0].page_start, 1);
    assert_eq!(chunks[0].page_end, 1);
    assert_eq!(chunks[0].text, page1);
    assert_eq!(chunks[0].token_count, tok.count(&buffer1));

    // Second chunk: seeded with the last 3 tokens of the cut buffer, then
    // page 2. Its start page records the cutting page, not where the
    // overlap text truly originated.
    let ids = tok.encode(&buffer1);
    let seed = tok.decode(ids[ids.len() - 3..].to_vec()).unwrap();
    let expected = format!("{seed}\n{page2}");
    assert_eq!(chunks[1].page_start, 1);
    assert_eq!(chunks[1].page_end, 2);
    assert_eq!(chunks[1].text, expected.trim());
    assert_eq!(chunks[1].token_count, tok.count(&expected));
}

#[test]
fn zero_overlap_carries_nothing_forward() {
    let page1 = text_with_min_tokens("alpha", 8);
    let page2 = text_with_min_tokens("bravo", 4);
    let doc = make_doc(vec![(1, page1.as_str()), (2, page2.as_str())]);

    let chunks = segmenter(5, 0).segment(&doc).unwrap();
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[1].text, page2);
    assert!(!chunks[1].text.contains("alpha"));
}

#[test]
fn overlap_larger_than_max_tokens_still_converges() {
    let pages: Vec<String> = (0..4).map(|_| text_with_min_tokens("carol", 8)).collect();
    let doc = make_doc(
        pages
            .iter()
            .enumerate()
            .map(|(i, t)| (i as u32 + 1, t.as_str()))
            .collect(),
    );

    let chunks = segmenter(5, 10).segment(&doc).unwrap();
    // The retained buffer alone keeps the threshold satisfied, so every
    // page triggers a cut.
    assert_eq!(chunks.len(), 4);
    for chunk in &chunks {
        assert!(chunk.token_count >= 5);
    }
}

// ── Invariants over multi-page documents ────────────────────────────

#[test]
fn page_ranges_are_well_formed_and_non_decreasing() {
    let pages: Vec<String> = (0..8).map(|_| text_with_min_tokens("delta", 7)).collect();
    let doc = make_doc(
        pages
            .iter()
            .enumerate()
            .map(|(i, t)| (i as u32 + 1, t.as_str()))
            .collect(),
    );

    let chunks = segmenter(10, 3).segment(&doc).unwrap();
    assert!(!chunks.is_empty());
    for chunk in &chunks {
        assert!(chunk.page_start <= chunk.page_end);
    }
    for pair in chunks.windows(2) {
        assert!(pair[1].page_start >= pair[0].page_start);
        assert!(pair[1].page_end >= pair[0].page_end);
    }
}

#[test]
fn every_chunk_except_the_last_meets_the_threshold() {
    let pages: Vec<String> = (0..9).map(|_| text_with_min_tokens("echo", 6)).collect();
    let doc = make_doc(
        pages
            .iter()
            .enumerate()
            .map(|(i, t)| (i as u32 + 1, t.as_str()))
            .collect(),
    );

    let chunks = segmenter(10, 2).segment(&doc).unwrap();
    assert!(chunks.len() >= 2);
    for chunk in &chunks[..chunks.len() - 1] {
        assert!(
            chunk.token_count >= 10,
            "non-final chunk below threshold: {}",
            chunk.token_count
        );
    }
}

#[test]
fn no_page_content_is_dropped() {
    let markers = ["apricot", "bilberry", "cloudberry", "damson", "elderberry"];
    let pages: Vec<String> = markers
        .iter()
        .map(|m| format!("{} {}", text_with_min_tokens("filler", 6), m))
        .collect();
    let doc = make_doc(
        pages
            .iter()
            .enumerate()
            .map(|(i, t)| (i as u32 + 1, t.as_str()))
            .collect(),
    );

    let chunks = segmenter(10, 2).segment(&doc).unwrap();
    let joined: String = chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let mut cursor = 0;
    for marker in markers {
        let found = joined[cursor..]
            .find(marker)
            .unwrap_or_else(|| panic!("{marker} missing or out of order"));
        cursor += found;
    }
}

#[test]
fn identical_runs_differ_only_in_chunk_ids() {
    let pages: Vec<String> = (0..5).map(|_| text_with_min_tokens("foxtrot", 7)).collect();
    let doc = make_doc(
        pages
            .iter()
            .enumerate()
            .map(|(i, t)| (i as u32 + 1, t.as_str()))
            .collect(),
    );

    let seg = segmenter(10, 3);
    let first = seg.segment(&doc).unwrap();
    let second = seg.segment(&doc).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_ne!(a.chunk_id, b.chunk_id);
        assert_eq!(a.document_id, b.document_id);
        assert_eq!(a.source_type, b.source_type);
        assert_eq!(a.page_start, b.page_start);
        assert_eq!(a.page_end, b.page_end);
        assert_eq!(a.text, b.text);
        assert_eq!(a.token_count, b.token_count);
    }
}

// ── Provenance bookkeeping ──────────────────────────────────────────

#[test]
fn leading_whitespace_page_claims_the_start_page() {
    let doc = make_doc(vec![(1, "   "), (2, "Real content here.")]);
    let chunks = segmenter(500, 50).segment(&doc).unwrap();

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].page_start, 1);
    assert_eq!(chunks[0].page_end, 2);
    assert_eq!(chunks[0].text, "Real content here.");
}

#[test]
fn trailing_chunk_spans_to_the_declared_page_count() {
    let mut doc = make_doc(vec![(1, "Only page with text.")]);
    doc.page_count = 3;
    let chunks = segmenter(500, 50).segment(&doc).unwrap();

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].page_start, 1);
    assert_eq!(chunks[0].page_end, 3);
}

// ── Configuration and document validation ───────────────────────────

#[test]
fn zero_max_tokens_is_rejected_at_construction() {
    let err = Segmenter::new(
        SegmenterConfig {
            max_tokens: 0,
            overlap_tokens: 3,
        },
        tokenizer(),
    )
    .err()
    .expect("zero max_tokens must not construct");
    assert!(matches!(err, SegmentError::InvalidConfiguration(_)));
}

#[test]
fn empty_document_id_is_malformed() {
    let mut doc = make_doc(vec![(1, "text")]);
    doc.document_id = String::new();
    let err = segmenter(10, 3).segment(&doc).unwrap_err();
    assert!(matches!(err, SegmentError::MalformedDocument(_)));
}

#[test]
fn zero_page_number_is_malformed() {
    let doc = Document {
        document_id: "doc-1".to_string(),
        source_type: "pdf".to_string(),
        source_name: "test.pdf".to_string(),
        page_count: 1,
        pages: vec![Page::new(0, "text")],
    };
    let err = segmenter(10, 3).segment(&doc).unwrap_err();
    assert!(matches!(err, SegmentError::MalformedDocument(_)));
}

#[test]
fn non_increasing_page_numbers_are_malformed() {
    let doc = Document {
        document_id: "doc-1".to_string(),
        source_type: "pdf".to_string(),
        source_name: "test.pdf".to_string(),
        page_count: 3,
        pages: vec![Page::new(1, "a"), Page::new(3, "b"), Page::new(2, "c")],
    };
    let err = segmenter(10, 3).segment(&doc).unwrap_err();
    assert!(matches!(err, SegmentError::MalformedDocument(_)));
}

#[test]
fn page_count_below_supplied_pages_is_malformed() {
    let mut doc = make_doc(vec![(1, "a"), (2, "b")]);
    doc.page_count = 1;
    let err = segmenter(10, 3).segment(&doc).unwrap_err();
    assert!(matches!(err, SegmentError::MalformedDocument(_)));
}

// ── Step function in isolation ──────────────────────────────────────

#[test]
fn feed_below_threshold_accumulates_without_emitting() {
    let doc = make_doc(vec![(1, "hello")]);
    let seg = segmenter(500, 50);
    let mut acc = Accumulator::default();

    let emitted = seg.feed(&mut acc, &doc.pages[0], &doc).unwrap();
    assert!(emitted.is_none());
    assert_eq!(acc.text, "\nhello");
    assert_eq!(acc.start_page, Some(1));
    assert_eq!(acc.pages_since_cut, 1);
}

#[test]
fn feed_past_threshold_cuts_and_reseeds() {
    let tok = tokenizer();
    let text = text_with_min_tokens("golf", 12);
    let doc = make_doc(vec![(1, text.as_str())]);
    let seg = segmenter(10, 3);
    let mut acc = Accumulator::default();

    let chunk = seg
        .feed(&mut acc, &doc.pages[0], &doc)
        .unwrap()
        .expect("threshold crossing must emit");
    assert_eq!(chunk.page_start, 1);
    assert_eq!(chunk.page_end, 1);

    let ids = tok.encode(&format!("\n{text}"));
    let expected_seed = tok.decode(ids[ids.len() - 3..].to_vec()).unwrap();
    assert_eq!(acc.text, expected_seed);
    assert_eq!(acc.start_page, Some(1));
    assert_eq!(acc.pages_since_cut, 0);
}

#[test]
fn finish_drops_a_buffer_holding_only_carried_overlap() {
    let doc = make_doc(vec![(1, "irrelevant")]);
    let seg = segmenter(10, 3);
    let acc = Accumulator {
        text: "leftover overlap".to_string(),
        start_page: Some(1),
        pages_since_cut: 0,
    };
    assert!(seg.finish(acc, &doc).unwrap().is_none());
}
