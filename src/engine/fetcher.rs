use crate::errors::EngineError;
use crate::models::{AudioFeatures, TimeRange, Track, TrackStub};
use anyhow::Result;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

/// Provider-imposed ceiling on ids per feature request
pub const FEATURE_CHUNK_SIZE: usize = 100;

/// The track-data provider the engine is supplied with. Network failure
/// modes are opaque to the core; transport policy (timeouts, retries)
/// belongs to the implementation.
#[cfg_attr(test, mockall::automock)]
pub trait TrackProvider: Sync {
    /// Audio features keyed by id. Ids the provider cannot resolve are
    /// absent from the map, not defaulted.
    fn fetch_features_batch(&self, ids: &[String]) -> Result<HashMap<String, AudioFeatures>>;

    fn fetch_top_tracks(&self, range: TimeRange) -> Result<Vec<TrackStub>>;

    fn fetch_saved_tracks(&self, limit: usize) -> Result<Vec<TrackStub>>;

    fn fetch_available_genres(&self) -> Result<Vec<String>>;
}

/// Annotates track stubs with audio features in bounded-size batches
pub struct FeatureBatchFetcher;

impl FeatureBatchFetcher {
    /// Number of requests needed for `n` identifiers
    pub fn chunk_count(n: usize) -> usize {
        n.div_ceil(FEATURE_CHUNK_SIZE)
    }

    /// Fetch features for the given stubs and merge them into full tracks,
    /// preserving input order. Duplicate ids keep their first occurrence.
    ///
    /// Chunks are requested concurrently. A failed chunk is not fatal: its
    /// tracks come back feature-less and the scoring layer degrades to
    /// popularity for them. Only when every chunk fails does the whole
    /// operation error out.
    pub fn fetch_features<P: TrackProvider>(
        provider: &P,
        stubs: Vec<TrackStub>,
    ) -> Result<Vec<Track>, EngineError> {
        if stubs.is_empty() {
            return Ok(Vec::new());
        }

        let mut seen: HashSet<String> = HashSet::new();
        let stubs: Vec<TrackStub> = stubs
            .into_iter()
            .filter(|s| seen.insert(s.id.clone()))
            .collect();

        let ids: Vec<String> = stubs.iter().map(|s| s.id.clone()).collect();
        let chunks: Vec<&[String]> = ids.chunks(FEATURE_CHUNK_SIZE).collect();
        let chunk_count = chunks.len();
        log::debug!(
            "fetching features for {} tracks in {chunk_count} chunk(s)",
            ids.len()
        );

        let results: Vec<Result<HashMap<String, AudioFeatures>>> = chunks
            .par_iter()
            .map(|chunk| provider.fetch_features_batch(chunk))
            .collect();

        let mut features: HashMap<String, AudioFeatures> = HashMap::new();
        let mut last_error: Option<anyhow::Error> = None;
        let mut failed = 0usize;
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(map) => features.extend(map),
                Err(e) => {
                    log::warn!(
                        "feature chunk {index} failed, its tracks degrade to feature-less: {e:#}"
                    );
                    failed += 1;
                    last_error = Some(e);
                }
            }
        }

        if failed == chunk_count {
            // Nothing succeeded; there is no partial result to degrade to
            let source = last_error.unwrap_or_else(|| anyhow::anyhow!("no chunks requested"));
            return Err(EngineError::ProviderFetch(source));
        }

        Ok(stubs
            .into_iter()
            .map(|stub| {
                let annotated = features.get(&stub.id).copied();
                Track::from_stub(stub, annotated)
            })
            .collect())
    }
}
