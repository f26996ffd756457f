use super::fetcher::TrackProvider;
use crate::errors::{EngineError, MIN_SEEDS};
use crate::models::{TimeRange, TrackStub};
use std::collections::HashSet;

/// Upstream recommendation requests accept at most this many seed tracks
pub const MAX_SEEDS: usize = 5;

/// How many saved tracks to pull when topping up the seed set
const SAVED_TRACKS_LIMIT: usize = 50;

/// Builds a small seed set for upstream recommendation requests, trying
/// data sources in priority order: top tracks first, then saved tracks.
pub struct SeedSelectionChain;

impl SeedSelectionChain {
    /// Collect up to [`MAX_SEEDS`] unique seed-track ids. A source that
    /// errors is treated as empty and the chain moves on. Fewer than two
    /// seeds overall signals the caller to switch to a genre-based
    /// strategy.
    pub fn select_seeds<P: TrackProvider>(provider: &P) -> Result<Vec<String>, EngineError> {
        let mut seeds: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        let top_tracks = provider
            .fetch_top_tracks(TimeRange::MediumTerm)
            .unwrap_or_else(|e| {
                log::warn!("top tracks unavailable for seeding: {e:#}");
                Vec::new()
            });
        Self::collect(&mut seeds, &mut seen, top_tracks);

        if seeds.len() < MAX_SEEDS {
            let saved_tracks = provider
                .fetch_saved_tracks(SAVED_TRACKS_LIMIT)
                .unwrap_or_else(|e| {
                    log::warn!("saved tracks unavailable for seeding: {e:#}");
                    Vec::new()
                });
            Self::collect(&mut seeds, &mut seen, saved_tracks);
        }

        if seeds.len() < MIN_SEEDS {
            return Err(EngineError::InsufficientSeeds { found: seeds.len() });
        }

        log::debug!("selected {} seed track(s)", seeds.len());
        Ok(seeds)
    }

    fn collect(seeds: &mut Vec<String>, seen: &mut HashSet<String>, stubs: Vec<TrackStub>) {
        for stub in stubs {
            if seeds.len() >= MAX_SEEDS {
                break;
            }
            if seen.insert(stub.id.clone()) {
                seeds.push(stub.id);
            }
        }
    }
}
