pub mod affinity;
pub mod assembler;
pub mod era;
pub mod fetcher;
pub mod mood;
pub mod range;
pub mod seeds;

#[cfg(test)]
mod engine_tests;

pub use assembler::{PlaylistAssembler, MAX_PLAYLIST_LEN};
pub use fetcher::{FeatureBatchFetcher, TrackProvider, FEATURE_CHUNK_SIZE};
pub use range::RangeScorer;
pub use seeds::{SeedSelectionChain, MAX_SEEDS};

use crate::models::{ScoredTrack, Track};

/// Popularity mapped to [0,1], reading through the default of 50
pub(crate) fn popularity_score(track: &Track) -> f32 {
    f32::from(track.popularity_or_default()) / 100.0
}

/// Descending sort by score, the order every scorer returns
pub(crate) fn sort_by_score_desc(scored: &mut [ScoredTrack]) {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
