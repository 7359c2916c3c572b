//! Greedy token-threshold segmentation with overlap carry-forward.
//!
//! Pages are folded into an accumulator; whenever the accumulated text
//! crosses the token threshold a chunk is cut and the accumulator is
//! reseeded from the tail tokens of the emitted text. A single forward pass
//! with O(1) extra state and no backtracking: every non-final chunk carries
//! at least `max_tokens` tokens, while a single oversized page can push a
//! chunk past the threshold (accepted trade-off, pages are bounded in
//! practice).

mod engine;
mod types;

pub use engine::Segmenter;
pub use types::{SegmentError, SegmenterConfig};

#[cfg(test)]
mod tests;
