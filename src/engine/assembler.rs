use super::affinity::{FavoritesScorer, GenreExplorerScorer};
use super::era::{NewReleasesScorer, ThrowbackScorer};
use super::mood::{Mood, MoodScorer};
use crate::errors::EngineError;
use crate::models::{LikedSongSet, PlaylistArchetype, ScoredTrack, Track};
use rand::Rng;
use std::collections::HashSet;

/// An output playlist never exceeds this many tracks
pub const MAX_PLAYLIST_LEN: usize = 10;

/// Top-level orchestrator: validates the request, dispatches to the matching
/// archetype scorer, and truncates to the final playlist.
pub struct PlaylistAssembler;

impl PlaylistAssembler {
    /// Assemble a playlist for a raw archetype request string. Unknown
    /// strings fall back to `mood-happy`.
    pub fn assemble(
        archetype: &str,
        pool: Vec<Track>,
        liked: &LikedSongSet,
        preferred_genres: &HashSet<String>,
        rng: &mut impl Rng,
    ) -> Result<Vec<ScoredTrack>, EngineError> {
        let archetype = PlaylistArchetype::parse_or_default(archetype);
        Self::assemble_for(archetype, pool, liked, preferred_genres, rng)
    }

    /// Assemble a playlist for an already-validated archetype.
    ///
    /// Returns exactly `min(10, pool)` tracks for a non-empty pool; an empty
    /// pool is the one fatal condition.
    pub fn assemble_for(
        archetype: PlaylistArchetype,
        pool: Vec<Track>,
        liked: &LikedSongSet,
        preferred_genres: &HashSet<String>,
        rng: &mut impl Rng,
    ) -> Result<Vec<ScoredTrack>, EngineError> {
        if pool.is_empty() {
            return Err(EngineError::EmptyPool);
        }

        let pool = Self::dedup_by_id(pool);
        log::info!(
            "assembling '{archetype}' playlist from a pool of {} track(s)",
            pool.len()
        );

        // One archetype, one scoring strategy
        let mut scored = match archetype {
            PlaylistArchetype::MoodHappy => MoodScorer::new(Mood::Happy).score_tracks(&pool, rng),
            PlaylistArchetype::MoodSad => MoodScorer::new(Mood::Sad).score_tracks(&pool, rng),
            PlaylistArchetype::MoodChill => MoodScorer::new(Mood::Chill).score_tracks(&pool, rng),
            PlaylistArchetype::MoodHype => MoodScorer::new(Mood::Hype).score_tracks(&pool, rng),
            PlaylistArchetype::Throwback => ThrowbackScorer::new().score_tracks(&pool, rng),
            PlaylistArchetype::NewReleases => NewReleasesScorer::new().score_tracks(&pool, rng),
            PlaylistArchetype::PastFavorites => FavoritesScorer::score_tracks(&pool, liked, rng),
            PlaylistArchetype::GenreExplorer => {
                // Explorer additionally favors artist diversity in selection
                let scored = GenreExplorerScorer::score_tracks(&pool, preferred_genres, rng);
                return Ok(GenreExplorerScorer::select_diverse(
                    scored,
                    MAX_PLAYLIST_LEN,
                    rng,
                ));
            }
        };

        scored.truncate(MAX_PLAYLIST_LEN);
        Ok(scored)
    }

    /// Track identity within one assembly run is by id; collaborators may
    /// hand us duplicates. First occurrence wins.
    fn dedup_by_id(pool: Vec<Track>) -> Vec<Track> {
        let mut seen: HashSet<String> = HashSet::new();
        pool.into_iter()
            .filter(|track| seen.insert(track.id.clone()))
            .collect()
    }
}
