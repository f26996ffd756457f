use thiserror::Error;

/// Errors the engine surfaces to the caller. Scoring-layer degradation
/// (missing features, genres, or liked songs) is deliberately not in this
/// taxonomy: it narrows to a weaker heuristic instead of failing.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No candidate tracks at all. Fatal for the request.
    #[error("candidate pool is empty, no playlist can be produced")]
    EmptyPool,

    /// The seed chain exhausted its sources below the usable threshold.
    /// Recoverable: the caller can switch to a genre-seeded strategy.
    #[error("only {found} seed tracks found, at least 2 required")]
    InsufficientSeeds { found: usize },

    /// Every feature chunk request failed. The core does not retry.
    #[error("feature fetch failed for all chunks: {0}")]
    ProviderFetch(anyhow::Error),
}

/// Minimum seed count below which track-seeded recommendations are not
/// attempted.
pub const MIN_SEEDS: usize = 2;
